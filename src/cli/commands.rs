//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable read when `--token` is not given
pub const TOKEN_ENV: &str = "AIRTABLE_API_TOKEN";

/// Airtable web data connector
#[derive(Parser, Debug)]
#[command(name = "airtable-wdc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Airtable API token (defaults to $AIRTABLE_API_TOKEN)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Connection state file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the bases the token can read, sorted by name
    Bases,

    /// Validate a base ID and write the initial connection state
    Connect {
        /// Airtable base ID (app...)
        #[arg(long)]
        base_id: String,

        /// Name of the record-ID column
        #[arg(long)]
        record_id_field: Option<String>,
    },

    /// Describe the base's tables and store field metadata in the state
    Schema {
        /// Write the table catalog here instead of stdout
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Fetch the rows of one table from the catalog
    Data {
        /// Table catalog written by `schema`
        #[arg(long)]
        catalog: PathBuf,

        /// Table ID (or Airtable table name)
        #[arg(long)]
        table: String,

        /// Write a Parquet file instead of JSON lines on stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}
