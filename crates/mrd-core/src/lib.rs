//! # mrd-core
//!
//! Core types shared across all Meridian crates:
//! - `Record`: one device metadata entry, a read-only map of named fields
//! - `ReportCode`: the closed outcome taxonomy emitted by validation stages
//! - `EnforceRule` / `EntryInfo` / `ContainerSchema`: field-level schema
//!   descriptors and the container registry built from them
//! - `fill_template`: pure expansion of `{{field}}` argument templates

pub mod enforce;
pub mod record;
pub mod report;
pub mod schema;
pub mod template;

pub use enforce::{EnforceError, EnforceRule, ValueType};
pub use record::{RESERVED_KEYS, Record};
pub use report::ReportCode;
pub use schema::{ContainerSchema, EntryInfo, SchemaRegistry};
pub use template::{TemplateError, fill_template};
