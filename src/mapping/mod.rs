//! Airtable → host mapping rules
//!
//! Three lookups sit between the two taxonomies:
//!
//! - **Identifiers**: [`sanitize_id`] rewrites free-form names into the
//!   host's `[A-Za-z0-9_]` column-ID grammar
//! - **Types**: [`map_field_type`] picks the host column type for a field
//! - **Values**: [`coerce_value`] turns a raw cell into a host scalar

mod coerce;
mod sanitize;
mod types;

pub use coerce::{coerce_value, CellValue};
pub use sanitize::sanitize_id;
pub use types::{column_role, is_excluded, map_field_type, ColumnRole, HostDataType, EXCLUDED_FIELD_TYPES};

#[cfg(test)]
mod tests;
