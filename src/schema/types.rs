//! Host schema descriptor types

use crate::mapping::{ColumnRole, HostDataType};
use serde::{Deserialize, Serialize};

/// Host table descriptor
///
/// The host hands this back unchanged when it asks for a table's rows, so it
/// doubles as the data phase's table reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    /// Host-legal table ID
    pub id: String,
    /// Airtable table name
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Airtable table this descriptor reads from
    pub fn source_table(&self) -> &str {
        &self.alias
    }

    /// Find a column by its host ID
    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Column IDs in order
    pub fn column_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }
}

/// Host column descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Host-legal column ID
    pub id: String,
    /// Display name (the Airtable field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// The Airtable field name; used to look the field up again at fetch time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub column_role: ColumnRole,
    pub data_type: HostDataType,
}
