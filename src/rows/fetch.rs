//! Data phase: Airtable records → host rows

use crate::error::{Error, Result};
use crate::mapping::{coerce_value, CellValue};
use crate::schema::{ColumnDescriptor, TableDescriptor};
use crate::source::{FieldMeta, SourceApi, SourceRecord};
use crate::state::ConnectionState;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One host row: column ID → cell (`None` is null)
pub type Row = BTreeMap<String, Option<CellValue>>;

/// Fetch and convert every record of the requested table.
///
/// `table` is the descriptor the host received from the schema phase; its
/// alias names the Airtable table and its columns decide the row shape.
pub async fn fetch_rows(
    source: &dyn SourceApi,
    state: &ConnectionState,
    table: &TableDescriptor,
) -> Result<Vec<Row>> {
    info!(
        "Getting data for table '{}' ({} columns)",
        table.source_table(),
        table.columns.len()
    );

    let fields = state.field_metadata.table(table.source_table());
    if fields.is_none() {
        warn!(
            "No field metadata for table '{}'; field columns will be empty",
            table.source_table()
        );
    }

    let records = source
        .select_all(&state.base_id, table.source_table())
        .await?;

    let record_id_column = state.record_id_column_id();
    let rows: Vec<Row> = records
        .iter()
        .map(|record| materialize_row(record, table, fields, &record_id_column))
        .collect();

    info!(
        "Finished data for table '{}': {} rows",
        table.source_table(),
        rows.len()
    );
    Ok(rows)
}

/// Build one row from one record
pub fn materialize_row(
    record: &SourceRecord,
    table: &TableDescriptor,
    fields: Option<&BTreeMap<String, FieldMeta>>,
    record_id_column: &str,
) -> Row {
    table
        .columns
        .iter()
        .map(|column| {
            let cell = if column.id == record_id_column {
                Some(CellValue::Text(record.id.clone()))
            } else {
                resolve_cell(record, column, table, fields).unwrap_or_else(|e| {
                    warn!("Record {} column '{}': {}", record.id, column.id, e);
                    None
                })
            };
            (column.id.clone(), cell)
        })
        .collect()
}

fn resolve_cell(
    record: &SourceRecord,
    column: &ColumnDescriptor,
    table: &TableDescriptor,
    fields: Option<&BTreeMap<String, FieldMeta>>,
) -> Result<Option<CellValue>> {
    // The description carries the Airtable field name
    let field_name = column
        .description
        .as_deref()
        .ok_or_else(|| Error::coercion(&column.id, "column has no field name"))?;

    let fields = fields.ok_or_else(|| Error::TableNotFound {
        table: table.source_table().to_string(),
    })?;

    let Some(raw) = record.get(field_name) else {
        return Ok(None);
    };

    let meta = fields
        .get(field_name)
        .ok_or_else(|| Error::coercion(field_name, "field is not in the stored metadata"))?;

    let cell = coerce_value(Some(raw), &meta.field_type).map_err(|e| match e {
        Error::Coercion { message, .. } => Error::coercion(field_name, message),
        other => other,
    })?;

    if cell.is_none() {
        debug!("Record {} field '{}' coerced to null", record.id, field_name);
    }
    Ok(cell)
}
