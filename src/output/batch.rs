//! Rows → Arrow RecordBatch

use crate::error::{Error, Result};
use crate::mapping::{CellValue, HostDataType};
use crate::rows::Row;
use crate::schema::{ColumnDescriptor, TableDescriptor};
use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray,
    TimestampMillisecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;
use tracing::debug;

/// Arrow type of a host column
fn arrow_type(data_type: HostDataType) -> DataType {
    match data_type {
        HostDataType::Bool => DataType::Boolean,
        HostDataType::Int => DataType::Int64,
        HostDataType::Float => DataType::Float64,
        HostDataType::Date => DataType::Date32,
        HostDataType::Datetime => DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        HostDataType::String => DataType::Utf8,
    }
}

/// Arrow schema of a table descriptor; every column is nullable
pub fn table_schema(table: &TableDescriptor) -> Schema {
    let fields: Vec<Field> = table
        .columns
        .iter()
        .map(|c| Field::new(&c.id, arrow_type(c.data_type), true))
        .collect();
    Schema::new(fields)
}

/// Build a RecordBatch from rows, typed by the table's columns.
///
/// Text that does not parse as the column's type becomes null.
pub fn rows_to_record_batch(table: &TableDescriptor, rows: &[Row]) -> Result<RecordBatch> {
    let schema = Arc::new(table_schema(table));

    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let columns: Vec<ArrayRef> = table
        .columns
        .iter()
        .map(|column| build_column(column, rows))
        .collect();

    RecordBatch::try_new(schema, columns)
        .map_err(|e| Error::output(format!("Failed to create RecordBatch: {e}")))
}

fn build_column(column: &ColumnDescriptor, rows: &[Row]) -> ArrayRef {
    let cells: Vec<Option<&CellValue>> = rows
        .iter()
        .map(|row| row.get(&column.id).and_then(Option::as_ref))
        .collect();

    match column.data_type {
        HostDataType::Bool => Arc::new(BooleanArray::from(
            cells.iter().map(|c| c.and_then(to_bool)).collect::<Vec<_>>(),
        )),
        HostDataType::Int => Arc::new(Int64Array::from(
            cells.iter().map(|c| c.and_then(to_int)).collect::<Vec<_>>(),
        )),
        HostDataType::Float => Arc::new(Float64Array::from(
            cells.iter().map(|c| c.and_then(to_float)).collect::<Vec<_>>(),
        )),
        HostDataType::Date => Arc::new(Date32Array::from(
            cells.iter().map(|c| c.and_then(to_date)).collect::<Vec<_>>(),
        )),
        HostDataType::Datetime => Arc::new(
            TimestampMillisecondArray::from(
                cells
                    .iter()
                    .map(|c| c.and_then(to_timestamp_millis))
                    .collect::<Vec<_>>(),
            )
            .with_timezone("UTC"),
        ),
        HostDataType::String => Arc::new(StringArray::from(
            cells.iter().map(|c| c.map(to_text)).collect::<Vec<_>>(),
        )),
    }
}

fn to_bool(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(b) => Some(*b),
        CellValue::Text(s) => s.parse().ok(),
    }
}

fn to_int(cell: &CellValue) -> Option<i64> {
    let text = cell.as_text()?.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    // Integral values may arrive in float notation ("3.0")
    let f = text.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        debug!("Dropping non-integral value '{}' from int column", text);
        None
    }
}

fn to_float(cell: &CellValue) -> Option<f64> {
    cell.as_text()?.trim().parse().ok()
}

/// Days since the Unix epoch
fn to_date(cell: &CellValue) -> Option<i32> {
    let text = cell.as_text()?.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    i32::try_from(date.signed_duration_since(epoch).num_days()).ok()
}

/// Milliseconds since the Unix epoch, UTC
fn to_timestamp_millis(cell: &CellValue) -> Option<i64> {
    let text = cell.as_text()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn to_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Bool(b) => b.to_string(),
        CellValue::Text(s) => s.clone(),
    }
}
