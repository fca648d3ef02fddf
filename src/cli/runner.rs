//! CLI runner - executes commands
//!
//! The command line plays the host: connection data lives in the state file
//! between commands, and the table catalog written by `schema` is what the
//! `data` command hands back, as the host would.

use crate::auth::Credential;
use crate::cli::commands::{Cli, Commands, TOKEN_ENV};
use crate::config::{load_config, SourceConfig};
use crate::error::{Error, Result};
use crate::host::{get_data, get_schema, submit_connection, MemoryHost};
use crate::output::{rows_to_record_batch, write_batch_to_parquet};
use crate::schema::TableDescriptor;
use crate::source::{AirtableClient, SourceApi};
use crate::state::{load_state_file, save_state_file, ConnectionState};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Table catalog file written by `schema` and read by `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub tables: Vec<TableDescriptor>,
}

impl Catalog {
    /// Find a table by host ID, falling back to the Airtable name
    pub fn find(&self, table: &str) -> Option<&TableDescriptor> {
        self.tables
            .iter()
            .find(|t| t.id == table)
            .or_else(|| self.tables.iter().find(|t| t.alias == table))
    }

    /// Read a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read catalog '{}': {e}",
                path.display()
            ))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Bases => self.bases().await,
            Commands::Connect {
                base_id,
                record_id_field,
            } => self.connect(base_id, record_id_field.as_deref()),
            Commands::Schema { catalog } => self.schema(catalog.as_deref()).await,
            Commands::Data {
                catalog,
                table,
                output,
            } => self.data(catalog, table, output.as_deref()).await,
            Commands::Serve { port } => crate::cli::serve(self.source_config()?, *port).await,
        }
    }

    /// Source config from `--config`, or defaults
    fn source_config(&self) -> Result<SourceConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => Ok(SourceConfig::default()),
        }
    }

    /// Token from `--token` or the environment; may be empty
    fn credential(&self) -> Credential {
        let token = self
            .cli
            .token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV).ok())
            .unwrap_or_default();
        Credential::new(token)
    }

    fn state_path(&self) -> Result<&PathBuf> {
        self.cli
            .state
            .as_ref()
            .ok_or_else(|| Error::config("State file not specified (use -s flag)"))
    }

    /// List bases
    async fn bases(&self) -> Result<()> {
        let client = AirtableClient::new(&self.source_config()?, self.credential())?;
        let list = client.list_bases().await?;
        let truncated = list.is_truncated();

        let bases = list.sorted_by_name();
        let mut stdout = std::io::stdout().lock();
        for base in &bases {
            writeln!(stdout, "{}", serde_json::to_string(base)?)?;
        }

        if truncated {
            eprintln!("Only the first page of bases is listed; enter other base IDs directly");
        }
        Ok(())
    }

    /// Form submit
    fn connect(&self, base_id: &str, record_id_field: Option<&str>) -> Result<()> {
        let mut host = MemoryHost::new(self.credential());
        let state = submit_connection(&mut host, base_id, record_id_field)?;

        if let Some(path) = &self.cli.state {
            save_state_file(path, &state)?;
            info!("Saved connection state to {}", path.display());
        }

        println!("{}", host.connection_data_ref());
        eprintln!("{}", host.connection_name().unwrap_or_default());
        Ok(())
    }

    /// Schema phase
    async fn schema(&self, catalog_path: Option<&Path>) -> Result<()> {
        let config = self.source_config()?;
        let state_path = self.state_path()?;
        let state = load_state_file(state_path)?;

        let start = Instant::now();
        let mut host =
            MemoryHost::new(self.credential()).with_connection_data(state.to_connection_data()?);
        get_schema(&mut host, |credential| {
            AirtableClient::new(&config, credential.clone())
        })
        .await;
        host.check()?;

        let updated = ConnectionState::from_connection_data(host.connection_data_ref())?;
        save_state_file(state_path, &updated)?;

        let catalog = Catalog {
            tables: host.into_schema()?,
        };
        info!(
            "Described {} tables in {:.2}s",
            catalog.tables.len(),
            start.elapsed().as_secs_f64()
        );

        let json = serde_json::to_string_pretty(&catalog)?;
        match catalog_path {
            Some(path) => {
                fs::write(path, json)?;
                info!("Wrote catalog to {}", path.display());
            }
            None => println!("{json}"),
        }
        Ok(())
    }

    /// Data phase
    async fn data(&self, catalog_path: &Path, table: &str, output: Option<&Path>) -> Result<()> {
        let config = self.source_config()?;
        let state = load_state_file(self.state_path()?)?;
        let catalog = Catalog::load(catalog_path)?;
        let table = catalog
            .find(table)
            .ok_or_else(|| Error::config(format!("Table '{table}' is not in the catalog")))?;

        let start = Instant::now();
        let mut host =
            MemoryHost::new(self.credential()).with_connection_data(state.to_connection_data()?);
        get_data(&mut host, table, |credential| {
            AirtableClient::new(&config, credential.clone())
        })
        .await;
        let rows = host.into_rows()?;
        info!(
            "Fetched {} rows from '{}' in {:.2}s",
            rows.len(),
            table.alias,
            start.elapsed().as_secs_f64()
        );

        match output {
            Some(path) => {
                let batch = rows_to_record_batch(table, &rows)?;
                write_batch_to_parquet(path, &batch, None)?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                for row in &rows {
                    writeln!(stdout, "{}", serde_json::to_string(row)?)?;
                }
            }
        }
        Ok(())
    }
}
