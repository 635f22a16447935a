//! Field enforcement rules.
//!
//! Every schema descriptor carries an [`EnforceRule`] that a record's stored
//! value must satisfy: a value type, a regular expression, a numeric range,
//! or an enumeration of allowed values.

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// JSON value types a descriptor may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Str,
    Int,
    Float,
    Bool,
    List,
    Dict,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Dict => "dict",
        }
    }

    /// Whether a stored value inhabits this type. Ints satisfy `Float`.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Dict => value.is_object(),
        }
    }
}

/// Why a value failed its enforcement rule.
#[derive(Debug, Error)]
pub enum EnforceError {
    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: &'static str,
        found: String,
    },

    #[error("value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch { pattern: String, value: String },

    #[error("value {value} outside range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("value '{value}' not one of {allowed:?}")]
    NotAllowed { value: String, allowed: Vec<String> },

    #[error("pattern and enumeration rules require a string, got {found}")]
    NotAString { found: String },

    #[error("range rule requires a number, got {found}")]
    NotANumber { found: String },
}

/// Short type tag for error messages.
fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
    .to_string()
}

/// The rule a field's stored value must satisfy.
#[derive(Debug, Clone)]
pub enum EnforceRule {
    /// No constraint.
    Any,
    /// Value must inhabit the given type.
    Type(ValueType),
    /// String value must match the anchored pattern.
    Pattern(Regex),
    /// Numeric value must fall inside the inclusive range.
    Range(f64, f64),
    /// String value must be one of the listed alternatives.
    OneOf(Vec<String>),
}

impl EnforceRule {
    /// Compile a pattern rule.
    ///
    /// # Panics
    ///
    /// Panics on an invalid pattern. Patterns are registry-owned literals,
    /// so a bad one is a programming error, not input.
    #[must_use]
    pub fn pattern(pattern: &str) -> Self {
        Self::Pattern(Regex::new(pattern).expect("registry pattern should compile"))
    }

    /// Check a stored value against the rule.
    ///
    /// # Errors
    ///
    /// Returns [`EnforceError`] describing the first way the value fails.
    pub fn check(&self, value: &Value) -> Result<(), EnforceError> {
        match self {
            Self::Any => Ok(()),
            Self::Type(expected) => {
                if expected.matches(value) {
                    Ok(())
                } else {
                    Err(EnforceError::WrongType {
                        expected: expected.as_str(),
                        found: type_name(value),
                    })
                }
            }
            Self::Pattern(regex) => {
                let text = value.as_str().ok_or_else(|| EnforceError::NotAString {
                    found: type_name(value),
                })?;
                if regex.is_match(text) {
                    Ok(())
                } else {
                    Err(EnforceError::PatternMismatch {
                        pattern: regex.as_str().to_string(),
                        value: text.to_string(),
                    })
                }
            }
            Self::Range(min, max) => {
                let number = value.as_f64().ok_or_else(|| EnforceError::NotANumber {
                    found: type_name(value),
                })?;
                if number >= *min && number <= *max {
                    Ok(())
                } else {
                    Err(EnforceError::OutOfRange {
                        value: number,
                        min: *min,
                        max: *max,
                    })
                }
            }
            Self::OneOf(allowed) => {
                let text = value.as_str().ok_or_else(|| EnforceError::NotAString {
                    found: type_name(value),
                })?;
                if allowed.iter().any(|candidate| candidate == text) {
                    Ok(())
                } else {
                    Err(EnforceError::NotAllowed {
                        value: text.to_string(),
                        allowed: allowed.clone(),
                    })
                }
            }
        }
    }
}
