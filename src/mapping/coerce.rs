//! Raw Airtable value → host cell value

use crate::error::{Error, Result};
use crate::source::FieldType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A host-representable cell value
///
/// A missing cell is `Option::None`, which the host reads as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Borrow the text payload, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Bool(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Convert a raw field value into a host cell.
///
/// A missing (or `null`) raw value stays missing whatever the field type.
/// Collaborator fields project to their email, checkboxes are true only for a
/// literal `true`, and everything else is converted to text.
pub fn coerce_value(raw: Option<&Value>, field_type: &FieldType) -> Result<Option<CellValue>> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(raw) => raw,
    };

    let cell = match field_type {
        FieldType::SingleCollaborator | FieldType::CreatedBy | FieldType::LastModifiedBy => {
            collaborator_email(raw).map(CellValue::from)
        }
        FieldType::MultipleCollaborators => {
            let collaborators = raw.as_array().ok_or_else(|| {
                Error::coercion(
                    field_type.as_str(),
                    format!("expected a list of collaborators, got {raw}"),
                )
            })?;
            let emails: Vec<&str> = collaborators
                .iter()
                .map(|c| collaborator_email(c).unwrap_or_default())
                .collect();
            Some(CellValue::Text(emails.join(",")))
        }
        FieldType::Checkbox => Some(CellValue::Bool(*raw == Value::Bool(true))),
        _ => Some(CellValue::Text(value_to_text(raw))),
    };

    Ok(cell)
}

fn collaborator_email(value: &Value) -> Option<&str> {
    value.get("email").and_then(Value::as_str)
}

/// Generic text conversion: strings verbatim, arrays comma-joined
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
