//! Connection state
//!
//! The host round-trips one opaque connection-data string between the
//! schema and data phases. It carries the chosen base, the record-ID column
//! name, and (after the schema phase) the field metadata side table.
//!
//! The credential is never stored here; the host keeps it separately.

mod store;
mod types;

pub use store::{load_state_file, save_state_file};
pub use types::{validate_base_id, ConnectionState, FieldMetadata, DEFAULT_RECORD_ID_FIELD};
