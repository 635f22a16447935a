//! The individual validation checks.
//!
//! Each check is a function of its inputs (record, registry, pipeline
//! state) and returns report codes; none of them owns shared state.

pub mod args;
pub mod class_field;
pub mod container;
pub mod enforce;
pub mod extras;

pub use args::{ResolvedArguments, resolve_arguments};
pub use class_field::{discover_module, validate_class_format, validate_import};
pub use container::validate_container;
pub use enforce::validate_enforce;
pub use extras::detect_extras;
