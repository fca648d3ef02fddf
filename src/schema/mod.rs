//! Schema handler
//!
//! Builds the host's table descriptors from Airtable metadata:
//!
//! - one table descriptor per Airtable table
//! - one column per field whose type is not excluded
//! - a trailing synthetic column carrying the Airtable record ID
//!
//! The field metadata collected along the way is returned with the
//! descriptors so the caller can stash it in the connection state for the
//! data phase.

mod describe;
mod types;

pub use describe::{describe_schema, describe_table, SchemaDescription};
pub use types::{ColumnDescriptor, TableDescriptor};

#[cfg(test)]
mod tests;
