//! CLI module
//!
//! Command-line and HTTP hosts for the connector.
//!
//! # Commands
//!
//! - `bases` - List bases readable with the token
//! - `connect` - Validate a base ID and write connection state
//! - `schema` - Describe tables, store field metadata
//! - `data` - Fetch one table's rows as JSON lines or Parquet
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, TOKEN_ENV};
pub use runner::{Catalog, Runner};
pub use server::{router, serve};
