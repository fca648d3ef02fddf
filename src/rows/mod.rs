//! Data handler
//!
//! Materializes host rows for one requested table: fetch every record, then
//! for each record and each requested column resolve a cell.
//!
//! Cell-level problems (unknown field, malformed value) are logged and leave
//! the cell empty; only fetch-level failures abort.

mod fetch;

pub use fetch::{fetch_rows, materialize_row, Row};
