//! File persistence for connection state
//!
//! Used by the command-line host, which keeps the connection-data string in
//! a file between the schema and data commands.

use super::types::ConnectionState;
use crate::error::{Error, Result};
use std::path::Path;

/// Read connection state from a file
pub fn load_state_file(path: impl AsRef<Path>) -> Result<ConnectionState> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::State {
        message: format!("Failed to read state file '{}': {e}", path.display()),
    })?;
    ConnectionState::from_connection_data(&contents)
}

/// Write connection state to a file
pub fn save_state_file(path: impl AsRef<Path>, state: &ConnectionState) -> Result<()> {
    let path = path.as_ref();
    let contents = serde_json::to_string_pretty(state).map_err(|e| Error::State {
        message: format!("Failed to serialize state: {e}"),
    })?;

    // Write to temp file first, then rename for atomicity
    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| Error::State {
        message: format!("Failed to write state file: {e}"),
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| Error::State {
        message: format!("Failed to rename state file: {e}"),
    })?;

    Ok(())
}
