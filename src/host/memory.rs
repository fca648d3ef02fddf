//! In-process host

use super::Host;
use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::rows::Row;
use crate::schema::TableDescriptor;

/// A host that keeps every callback's payload in memory
///
/// Used by the CLI and the HTTP server to run the two phases without a real
/// analytics tool attached.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    connection_data: String,
    connection_name: Option<String>,
    credential: Credential,
    tables: Option<Vec<TableDescriptor>>,
    rows: Vec<Row>,
    done: bool,
    errors: Vec<String>,
}

impl MemoryHost {
    /// Create a host holding a credential and no connection data
    pub fn new(credential: Credential) -> Self {
        Self {
            connection_data: String::new(),
            connection_name: None,
            credential,
            tables: None,
            rows: Vec::new(),
            done: false,
            errors: Vec::new(),
        }
    }

    /// Start from previously saved connection data
    #[must_use]
    pub fn with_connection_data(mut self, data: impl Into<String>) -> Self {
        self.connection_data = data.into();
        self
    }

    /// Saved connection data
    pub fn connection_data_ref(&self) -> &str {
        &self.connection_data
    }

    /// Connection name set at form submit
    pub fn connection_name(&self) -> Option<&str> {
        self.connection_name.as_deref()
    }

    /// Tables submitted by the schema phase
    pub fn tables(&self) -> Option<&[TableDescriptor]> {
        self.tables.as_deref()
    }

    /// Rows appended by the data phase
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Whether the data phase signalled completion
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Abort messages, in order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// First abort, as an error
    pub fn check(&self) -> Result<()> {
        match self.errors.first() {
            Some(message) => Err(Error::Other(message.clone())),
            None => Ok(()),
        }
    }

    /// Consume the host, returning the submitted schema or the abort
    pub fn into_schema(self) -> Result<Vec<TableDescriptor>> {
        self.check()?;
        self.tables
            .ok_or_else(|| Error::Other("schema phase did not complete".to_string()))
    }

    /// Consume the host, returning the appended rows or the abort
    pub fn into_rows(self) -> Result<Vec<Row>> {
        self.check()?;
        if !self.done {
            return Err(Error::Other("data phase did not complete".to_string()));
        }
        Ok(self.rows)
    }
}

impl Host for MemoryHost {
    fn connection_data(&self) -> String {
        self.connection_data.clone()
    }

    fn set_connection_data(&mut self, data: String) {
        self.connection_data = data;
    }

    fn set_connection_name(&mut self, name: String) {
        self.connection_name = Some(name);
    }

    fn credential(&self) -> Credential {
        self.credential.clone()
    }

    fn submit_schema(&mut self, tables: Vec<TableDescriptor>) {
        self.tables = Some(tables);
    }

    fn append_rows(&mut self, rows: Vec<Row>) {
        self.rows.extend(rows);
    }

    fn done(&mut self) {
        self.done = true;
    }

    fn abort_with_error(&mut self, message: String) {
        self.errors.push(message);
    }
}
