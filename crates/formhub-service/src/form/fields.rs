//! Sanitization of editor-supplied field lists.
//!
//! The form editor sends loosely typed JSON. Each field is coerced into a
//! [`Field`] with the same rules every time, so saving the same payload
//! twice stores the same list.

use serde_json::{Map, Value};

use formhub_core::error::AppError;
use formhub_core::result::AppResult;
use formhub_entity::form::Field;

/// Convert a JSON array of field objects into typed fields.
pub fn sanitize_fields(value: &Value) -> AppResult<Vec<Field>> {
    let Value::Array(items) = value else {
        return Err(AppError::validation("Fields must be an array"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(obj) => sanitize_field(obj, index),
            _ => Err(AppError::validation(format!(
                "Field at position {index} must be an object"
            ))),
        })
        .collect()
}

fn sanitize_field(obj: &Map<String, Value>, index: usize) -> AppResult<Field> {
    let text = |key: &str| text_attr(obj.get(key), key, index);

    Ok(Field {
        id: text("id")?,
        field_type: text("type")?,
        category: text("category")?,
        content: text("content")?,
        required: obj.get("required").is_some_and(truthy),
        options: options_attr(obj.get("options"), index)?,
        hint: text("hint")?,
        url: text("url")?,
    })
}

/// Missing and null become `""`, scalars are stringified.
fn text_attr(value: Option<&Value>, key: &str, index: usize) -> AppResult<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(AppError::validation(format!(
            "Field at position {index}: '{key}' must be a string"
        ))),
    }
}

/// Anything but an array yields no options; null entries are dropped.
fn options_attr(value: Option<&Value>, index: usize) -> AppResult<Vec<String>> {
    let Some(Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };

    let mut options = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::Null => {}
            Value::String(s) => options.push(s.clone()),
            Value::Number(n) => options.push(n.to_string()),
            Value::Bool(b) => options.push(b.to_string()),
            _ => {
                return Err(AppError::validation(format!(
                    "Field at position {index}: options must be scalar values"
                )));
            }
        }
    }
    Ok(options)
}

/// JavaScript-style truthiness.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
