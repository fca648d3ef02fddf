//! Typed output of fetched rows
//!
//! Rows leave the data phase as loosely typed cells (booleans and text).
//! This module gives them the column types the schema phase announced by
//! building an Arrow `RecordBatch`, and writes batches to Parquet.

mod batch;
mod writer;

pub use batch::{rows_to_record_batch, table_schema};
pub use writer::{write_batch_to_parquet, ParquetWriter, ParquetWriterConfig};
