//! Airtable API response shapes
//!
//! Every response is decoded into these types before use, so a missing or
//! mistyped field surfaces as a decode error instead of a panic further down.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Field Types
// ============================================================================

/// Airtable field type
///
/// Only the types the adapter treats specially are named; everything else is
/// kept verbatim in `Other` so it round-trips through the connection state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    SingleLineText,
    MultilineText,
    Checkbox,
    Number,
    Currency,
    Percent,
    Count,
    Rating,
    Duration,
    Date,
    DateTime,
    CreatedTime,
    LastModifiedTime,
    SingleCollaborator,
    MultipleCollaborators,
    CreatedBy,
    LastModifiedBy,
    Button,
    MultipleAttachments,
    Other(String),
}

impl FieldType {
    /// The wire name of this field type
    pub fn as_str(&self) -> &str {
        match self {
            Self::SingleLineText => "singleLineText",
            Self::MultilineText => "multilineText",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percent => "percent",
            Self::Count => "count",
            Self::Rating => "rating",
            Self::Duration => "duration",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::CreatedTime => "createdTime",
            Self::LastModifiedTime => "lastModifiedTime",
            Self::SingleCollaborator => "singleCollaborator",
            Self::MultipleCollaborators => "multipleCollaborators",
            Self::CreatedBy => "createdBy",
            Self::LastModifiedBy => "lastModifiedBy",
            Self::Button => "button",
            Self::MultipleAttachments => "multipleAttachments",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "singleLineText" => Self::SingleLineText,
            "multilineText" => Self::MultilineText,
            "checkbox" => Self::Checkbox,
            "number" => Self::Number,
            "currency" => Self::Currency,
            "percent" => Self::Percent,
            "count" => Self::Count,
            "rating" => Self::Rating,
            "duration" => Self::Duration,
            "date" => Self::Date,
            "dateTime" => Self::DateTime,
            "createdTime" => Self::CreatedTime,
            "lastModifiedTime" => Self::LastModifiedTime,
            "singleCollaborator" => Self::SingleCollaborator,
            "multipleCollaborators" => Self::MultipleCollaborators,
            "createdBy" => Self::CreatedBy,
            "lastModifiedBy" => Self::LastModifiedBy,
            "button" => Self::Button,
            "multipleAttachments" => Self::MultipleAttachments,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Metadata API
// ============================================================================

/// Response of `GET /meta/bases`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseList {
    /// Bases visible to the credential (first page only)
    pub bases: Vec<BaseSummary>,
    /// Continuation token, present when more bases exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl BaseList {
    /// Whether the listing stopped at the first page with more bases remaining
    pub fn is_truncated(&self) -> bool {
        self.offset.is_some()
    }

    /// Bases ordered by name, as presented to users picking a base
    pub fn sorted_by_name(mut self) -> Vec<BaseSummary> {
        self.bases.sort_by(|a, b| a.name.cmp(&b.name));
        self.bases
    }
}

/// A base id/name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_level: Option<String>,
}

/// Response of `GET /meta/bases/{baseId}/tables`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseSchema {
    pub tables: Vec<TableMeta>,
}

/// Table metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldMeta>,
}

/// Field metadata, as returned by the metadata API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type-specific options (choices, precision, linked table, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl FieldMeta {
    /// Create field metadata with just a name and type
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            id: None,
            name: name.into(),
            field_type: field_type.into(),
            description: None,
            options: None,
        }
    }
}

// ============================================================================
// Records API
// ============================================================================

/// One page of `GET /{baseId}/{table}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    pub records: Vec<SourceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// A single Airtable record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Opaque record ID (`rec...`)
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    /// Field-name keyed values; empty cells are omitted by the API
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl SourceRecord {
    /// Raw value of a field, if the record carries one
    pub fn get(&self, field_name: &str) -> Option<&Value> {
        self.fields.get(field_name)
    }
}
