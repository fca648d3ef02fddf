//! Connection state types

use crate::error::{Error, Result};
use crate::mapping::sanitize_id;
use crate::source::{FieldMeta, TableMeta};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Record-ID column name used when none is configured
pub const DEFAULT_RECORD_ID_FIELD: &str = "_airtableRecordId";

/// Airtable base IDs look like `appXXXXXXXXXXXXXX`
static BASE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^app[A-Za-z0-9]{5,}$").unwrap());

/// Table name → field name → field metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMetadata(BTreeMap<String, BTreeMap<String, FieldMeta>>);

impl FieldMetadata {
    /// Create an empty side table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, keeping only the given fields
    pub fn insert_table<'a>(
        &mut self,
        table: &TableMeta,
        fields: impl IntoIterator<Item = &'a FieldMeta>,
    ) {
        let entry = self.0.entry(table.name.clone()).or_default();
        for field in fields {
            entry.insert(field.name.clone(), field.clone());
        }
    }

    /// Fields of a table, by table name
    pub fn table(&self, table_name: &str) -> Option<&BTreeMap<String, FieldMeta>> {
        self.0.get(table_name)
    }

    /// A single field's metadata
    pub fn field(&self, table_name: &str, field_name: &str) -> Option<&FieldMeta> {
        self.0.get(table_name)?.get(field_name)
    }

    /// Whether no table has been registered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State round-tripped through the host between the two phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionState {
    /// Airtable base the connection reads from
    #[serde(rename = "BASE_ID")]
    pub base_id: String,

    /// Name of the synthetic column carrying the Airtable record ID
    #[serde(
        rename = "FIELD_NAME_FOR_AIRTABLE_RECORD_ID",
        default = "default_record_id_field"
    )]
    pub record_id_field: String,

    /// Field metadata written by the schema phase
    #[serde(
        rename = "TABLE_FIELD_METADATA",
        default,
        skip_serializing_if = "FieldMetadata::is_empty"
    )]
    pub field_metadata: FieldMetadata,
}

fn default_record_id_field() -> String {
    DEFAULT_RECORD_ID_FIELD.to_string()
}

impl ConnectionState {
    /// Build the state submitted when a user picks a base
    pub fn new(base_id: impl Into<String>) -> Result<Self> {
        let base_id = base_id.into().trim().to_string();
        validate_base_id(&base_id)?;
        Ok(Self {
            base_id,
            record_id_field: default_record_id_field(),
            field_metadata: FieldMetadata::new(),
        })
    }

    /// Use a different record-ID column name
    pub fn with_record_id_field(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if sanitize_id(&name).is_empty() {
            return Err(Error::invalid_value(
                "record_id_field",
                "record ID column name cannot be empty",
            ));
        }
        self.record_id_field = name;
        Ok(self)
    }

    /// Parse the host's connection-data string
    pub fn from_connection_data(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Err(Error::state("connection data is empty"));
        }
        let state: Self = serde_json::from_str(data)
            .map_err(|e| Error::state(format!("Failed to parse connection data: {e}")))?;
        if state.base_id.is_empty() {
            return Err(Error::state("connection data has no base ID"));
        }
        if state.record_id_field.is_empty() {
            return Err(Error::state("connection data has no record ID column name"));
        }
        Ok(state)
    }

    /// Serialize to the host's connection-data string
    pub fn to_connection_data(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::state(format!("Failed to serialize connection data: {e}")))
    }

    /// Display name the host shows for this connection
    pub fn connection_name(&self) -> String {
        format!("Airtable Base {}", self.base_id)
    }

    /// Host column ID of the record-ID column
    pub fn record_id_column_id(&self) -> String {
        sanitize_id(&self.record_id_field)
    }
}

/// Check a user-entered base ID
pub fn validate_base_id(base_id: &str) -> Result<()> {
    if base_id.is_empty() {
        return Err(Error::missing_field("base_id"));
    }
    if !BASE_ID_REGEX.is_match(base_id) {
        return Err(Error::invalid_value(
            "base_id",
            format!("'{base_id}' should start with the letters 'app'"),
        ));
    }
    Ok(())
}
