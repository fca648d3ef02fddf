//! Field type → host column type lookup

use crate::source::FieldType;
use serde::{Deserialize, Serialize};

/// Host column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostDataType {
    Bool,
    Date,
    Datetime,
    Float,
    Int,
    String,
}

impl HostDataType {
    /// Whether the host should aggregate columns of this type
    pub fn is_numeric(self) -> bool {
        matches!(self, HostDataType::Int | HostDataType::Float)
    }
}

impl std::fmt::Display for HostDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostDataType::Bool => write!(f, "bool"),
            HostDataType::Date => write!(f, "date"),
            HostDataType::Datetime => write!(f, "datetime"),
            HostDataType::Float => write!(f, "float"),
            HostDataType::Int => write!(f, "int"),
            HostDataType::String => write!(f, "string"),
        }
    }
}

/// Host column role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    #[default]
    Dimension,
    Measure,
}

/// Field types that never become host columns
pub const EXCLUDED_FIELD_TYPES: &[FieldType] = &[FieldType::Button, FieldType::MultipleAttachments];

/// Whether fields of this type are left out of the schema
pub fn is_excluded(field_type: &FieldType) -> bool {
    EXCLUDED_FIELD_TYPES.contains(field_type)
}

/// Pick the host column type for an Airtable field type.
///
/// Unlisted types fall back to `string`.
pub fn map_field_type(field_type: &FieldType) -> HostDataType {
    match field_type {
        FieldType::Checkbox => HostDataType::Bool,
        FieldType::CreatedTime | FieldType::LastModifiedTime | FieldType::DateTime => {
            HostDataType::Datetime
        }
        FieldType::Date => HostDataType::Date,
        FieldType::Number | FieldType::Currency | FieldType::Percent => HostDataType::Float,
        FieldType::Count | FieldType::Rating | FieldType::Duration => HostDataType::Int,
        _ => HostDataType::String,
    }
}

/// Numeric columns are measures, everything else is a dimension
pub fn column_role(data_type: HostDataType) -> ColumnRole {
    if data_type.is_numeric() {
        ColumnRole::Measure
    } else {
        ColumnRole::Dimension
    }
}
