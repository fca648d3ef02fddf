//! Schema phase: Airtable metadata → host table descriptors

use super::types::{ColumnDescriptor, TableDescriptor};
use crate::error::Result;
use crate::mapping::{column_role, is_excluded, map_field_type, sanitize_id, ColumnRole, HostDataType};
use crate::source::{FieldMeta, SourceApi, TableMeta};
use crate::state::{ConnectionState, FieldMetadata};
use tracing::{debug, info};

/// Result of the schema phase
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescription {
    /// One descriptor per Airtable table
    pub tables: Vec<TableDescriptor>,
    /// Metadata of every column-backed field, for the data phase
    pub field_metadata: FieldMetadata,
}

/// Describe every table of the connection's base.
///
/// Makes exactly one metadata call. Any failure aborts the whole description.
pub async fn describe_schema(
    source: &dyn SourceApi,
    state: &ConnectionState,
) -> Result<SchemaDescription> {
    info!("Describing schema of base {}", state.base_id);
    let base = source.base_schema(&state.base_id).await?;

    let mut field_metadata = FieldMetadata::new();
    let mut tables = Vec::with_capacity(base.tables.len());

    for table in &base.tables {
        let kept: Vec<&FieldMeta> = table
            .fields
            .iter()
            .filter(|f| !is_excluded(&f.field_type))
            .collect();

        field_metadata.insert_table(table, kept.iter().copied());
        tables.push(describe_table(table, &kept, state));
    }

    info!("Described {} tables", tables.len());
    Ok(SchemaDescription {
        tables,
        field_metadata,
    })
}

/// Build the descriptor of one table from its kept fields
pub fn describe_table(
    table: &TableMeta,
    fields: &[&FieldMeta],
    state: &ConnectionState,
) -> TableDescriptor {
    let skipped = table.fields.len().saturating_sub(fields.len());
    if skipped > 0 {
        debug!("Table '{}': skipping {} excluded fields", table.name, skipped);
    }

    let mut columns: Vec<ColumnDescriptor> = fields.iter().map(|f| field_column(f)).collect();
    columns.push(ColumnDescriptor {
        id: state.record_id_column_id(),
        alias: None,
        description: Some(format!("Airtable Record ID from table {}", table.name)),
        column_role: ColumnRole::Dimension,
        data_type: HostDataType::String,
    });

    TableDescriptor {
        id: sanitize_id(&table.name),
        alias: table.name.clone(),
        description: Some(format!(
            "Airtable '{}' ({}) from base {}.",
            table.name, table.id, state.base_id
        )),
        columns,
    }
}

fn field_column(field: &FieldMeta) -> ColumnDescriptor {
    let data_type = map_field_type(&field.field_type);
    ColumnDescriptor {
        id: sanitize_id(&field.name),
        alias: Some(field.name.clone()),
        description: Some(field.name.clone()),
        column_role: column_role(data_type),
        data_type,
    }
}
