// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Airtable Web Data Connector
//!
//! Adapts Airtable bases to a Tableau-style web data connector: the host
//! asks for a schema, then for the rows of each table it picked.
//!
//! ## Phases
//!
//! - **Connect**: the user picks a base; the connector validates the ID and
//!   saves it as connection data
//! - **Schema**: one metadata call; each table becomes a table descriptor,
//!   each usable field a column, plus a record-ID column. Field metadata is
//!   stored in the connection data
//! - **Data**: every record of one table is fetched and each cell is coerced
//!   to a host value using the stored metadata
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airtable_wdc::auth::Credential;
//! use airtable_wdc::config::SourceConfig;
//! use airtable_wdc::host::{get_data, get_schema, submit_connection, MemoryHost};
//! use airtable_wdc::source::AirtableClient;
//!
//! let config = SourceConfig::default();
//! let connect = |c: &Credential| AirtableClient::new(&config, c.clone());
//!
//! let mut host = MemoryHost::new(Credential::new("pat..."));
//! submit_connection(&mut host, "appXXXXXXXXXXXXXX", None)?;
//! get_schema(&mut host, connect).await;
//! let table = host.tables().unwrap()[0].clone();
//! get_data(&mut host, &table, connect).await;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │            Host boundary (get_schema / get_data)             │
//! └───────────────┬──────────────────────────────┬───────────────┘
//!                 │                              │
//!        ┌────────┴────────┐            ┌────────┴────────┐
//!        │ describe_schema │            │   fetch_rows    │
//!        └────────┬────────┘            └────────┬────────┘
//! ┌──────────┬────┴──────┬────────────┬──────────┴─┬─────────────┐
//! │ Mapping  │  Source   │    HTTP    │ Pagination │   Output    │
//! ├──────────┼───────────┼────────────┼────────────┼─────────────┤
//! │ Sanitize │ Metadata  │ Bearer     │ Offset     │ Arrow       │
//! │ Types    │ Records   │ Rate Limit │ token      │ Parquet     │
//! │ Coerce   │           │            │            │             │
//! └──────────┴───────────┴────────────┴────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Bearer credential
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Offset-token pagination
pub mod pagination;

/// Source API configuration
pub mod config;

/// Airtable API client
pub mod source;

/// Identifier, type and value mapping
pub mod mapping;

/// Connection state
pub mod state;

/// Schema handler
pub mod schema;

/// Data handler
pub mod rows;

/// Host boundary
pub mod host;

/// Arrow/Parquet output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use host::{get_data, get_schema, Host, MemoryHost};
pub use rows::{fetch_rows, Row};
pub use schema::{describe_schema, ColumnDescriptor, TableDescriptor};
pub use source::{AirtableClient, SourceApi};
pub use state::ConnectionState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
