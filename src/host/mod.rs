//! Host boundary
//!
//! The host drives the adapter through callbacks: it hands over the
//! connection data and the credential, and expects either a success callback
//! or a single abort with a message. The functions here are the only place
//! where the pure handlers meet that contract, and they never let an error
//! escape.

mod memory;

pub use memory::MemoryHost;

use crate::auth::Credential;
use crate::error::Result;
use crate::rows::{fetch_rows, Row};
use crate::schema::{describe_schema, TableDescriptor};
use crate::source::SourceApi;
use crate::state::ConnectionState;
use tracing::{error, info};

/// Callbacks the host exposes to the adapter
pub trait Host {
    /// Opaque connection data saved by the host
    fn connection_data(&self) -> String;

    /// Replace the saved connection data
    fn set_connection_data(&mut self, data: String);

    /// Name the host shows for the connection
    fn set_connection_name(&mut self, name: String);

    /// The secret the user entered
    fn credential(&self) -> Credential;

    /// Schema phase success
    fn submit_schema(&mut self, tables: Vec<TableDescriptor>);

    /// Hand a batch of rows to the host
    fn append_rows(&mut self, rows: Vec<Row>);

    /// Data phase success
    fn done(&mut self);

    /// Failure of either phase
    fn abort_with_error(&mut self, message: String);
}

/// Form submit: validate the base and save the initial connection data.
///
/// Unlike the two phases this returns its error, since a rejected form never
/// reaches the host.
pub fn submit_connection<H: Host + ?Sized>(
    host: &mut H,
    base_id: &str,
    record_id_field: Option<&str>,
) -> Result<ConnectionState> {
    let mut state = ConnectionState::new(base_id)?;
    if let Some(name) = record_id_field {
        state = state.with_record_id_field(name)?;
    }

    host.set_connection_data(state.to_connection_data()?);
    host.set_connection_name(state.connection_name());
    info!("Connection set up for base {}", state.base_id);
    Ok(state)
}

/// Schema phase as invoked by the host
pub async fn get_schema<H, S, F>(host: &mut H, connect: F)
where
    H: Host + ?Sized,
    S: SourceApi,
    F: FnOnce(&Credential) -> Result<S>,
{
    match run_schema(&*host, connect).await {
        Ok((tables, data)) => {
            host.set_connection_data(data);
            host.submit_schema(tables);
        }
        Err(e) => {
            error!("Schema phase failed: {}", e);
            host.abort_with_error(format!("Error during getSchema: {e}"));
        }
    }
}

async fn run_schema<H, S, F>(host: &H, connect: F) -> Result<(Vec<TableDescriptor>, String)>
where
    H: Host + ?Sized,
    S: SourceApi,
    F: FnOnce(&Credential) -> Result<S>,
{
    let mut state = ConnectionState::from_connection_data(&host.connection_data())?;
    let source = connect(&host.credential())?;

    let description = describe_schema(&source, &state).await?;
    state.field_metadata = description.field_metadata;

    Ok((description.tables, state.to_connection_data()?))
}

/// Data phase as invoked by the host, for one table
pub async fn get_data<H, S, F>(host: &mut H, table: &TableDescriptor, connect: F)
where
    H: Host + ?Sized,
    S: SourceApi,
    F: FnOnce(&Credential) -> Result<S>,
{
    match run_data(&*host, table, connect).await {
        Ok(rows) => {
            host.append_rows(rows);
            host.done();
        }
        Err(e) => {
            error!("Data phase failed for table '{}': {}", table.id, e);
            host.abort_with_error(format!("Error during getData: {e}"));
        }
    }
}

async fn run_data<H, S, F>(host: &H, table: &TableDescriptor, connect: F) -> Result<Vec<Row>>
where
    H: Host + ?Sized,
    S: SourceApi,
    F: FnOnce(&Credential) -> Result<S>,
{
    let state = ConnectionState::from_connection_data(&host.connection_data())?;
    let source = connect(&host.credential())?;
    fetch_rows(&source, &state, table).await
}
