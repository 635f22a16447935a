//! Templated argument expansion.
//!
//! Constructor arguments may reference sibling fields of the same record
//! with `{{field}}` placeholders. Expansion is a pure function of the
//! template string and the record; attempting to construct anything with
//! the result is a separate concern handled by the audit pipeline.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::record::Record;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template references unknown field '{field}'")]
    UnknownField { field: String },
}

/// Expand `{{field}}` placeholders in a template against a record.
///
/// A template that is exactly one placeholder resolves to the referenced
/// field's value unchanged, preserving its type. Mixed templates resolve to
/// a string; with `enforce_type` the result is additionally coerced back to
/// a bool or number when it parses as one.
///
/// # Errors
///
/// Returns [`TemplateError::UnknownField`] if a placeholder names a field
/// the record does not carry.
pub fn fill_template(
    template: &str,
    record: &Record,
    enforce_type: bool,
) -> Result<Value, TemplateError> {
    // Whole-string placeholder: hand back the field value itself.
    if let Some(captures) = PLACEHOLDER.captures(template.trim()) {
        if captures.get(0).map(|m| m.as_str()) == Some(template.trim()) {
            let field = &captures[1];
            return record
                .get(field)
                .cloned()
                .ok_or_else(|| TemplateError::UnknownField {
                    field: field.to_string(),
                });
        }
    }

    let mut failed: Option<String> = None;
    let rendered = PLACEHOLDER.replace_all(template, |captures: &regex::Captures<'_>| {
        let field = &captures[1];
        match record.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => {
                failed.get_or_insert_with(|| field.to_string());
                String::new()
            }
        }
    });

    if let Some(field) = failed {
        return Err(TemplateError::UnknownField { field });
    }

    if enforce_type {
        return Ok(coerce(&rendered));
    }
    Ok(Value::String(rendered.into_owned()))
}

/// Reinterpret a rendered string as the tightest JSON scalar it parses as.
fn coerce(text: &str) -> Value {
    match text {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = text.parse::<f64>() {
        return Value::from(float);
    }
    Value::String(text.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn whole_placeholder_preserves_type() {
        let rec = record(json!({"name": "im3l0", "channel": 7}));
        assert_eq!(fill_template("{{channel}}", &rec, true).unwrap(), json!(7));
        assert_eq!(
            fill_template("{{ name }}", &rec, true).unwrap(),
            json!("im3l0")
        );
    }

    #[test]
    fn mixed_template_renders_to_string() {
        let rec = record(json!({"name": "im3l0", "channel": 7}));
        assert_eq!(
            fill_template("{{name}}_ch{{channel}}", &rec, false).unwrap(),
            json!("im3l0_ch7")
        );
    }

    #[test]
    fn enforce_type_coerces_scalars() {
        let rec = record(json!({"channel": 7, "scale": 0.5, "active": true}));
        assert_eq!(fill_template("{{channel}}", &rec, true).unwrap(), json!(7));
        assert_eq!(fill_template("x{{channel}}", &rec, true).unwrap(), json!("x7"));
        assert_eq!(fill_template("{{scale}}0", &rec, true).unwrap(), json!(0.50));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let rec = record(json!({"name": "im3l0"}));
        let err = fill_template("{{prefix}}", &rec, true).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownField { ref field } if field == "prefix"));
        assert!(fill_template("a {{nope}} b", &rec, false).is_err());
    }

    #[test]
    fn plain_strings_pass_through() {
        let rec = record(json!({}));
        assert_eq!(
            fill_template("IM3L0:PPM", &rec, false).unwrap(),
            json!("IM3L0:PPM")
        );
    }
}
