//! Airtable source API
//!
//! Two REST surfaces are used:
//!
//! - **Metadata API** (`/meta/bases`, `/meta/bases/{id}/tables`): bases,
//!   tables and field definitions
//! - **Records API** (`/{baseId}/{table}`): row data, paged by an `offset`
//!   token that [`AirtableClient::select_all`] follows internally
//!
//! Handlers depend on the [`SourceApi`] trait rather than the concrete
//! client, so they can run against an in-memory source in tests.

mod client;
mod memory;
mod types;

pub use client::AirtableClient;
pub use memory::MemorySource;
pub use types::{
    BaseList, BaseSchema, BaseSummary, FieldMeta, FieldType, RecordPage, SourceRecord, TableMeta,
};

use crate::error::Result;
use async_trait::async_trait;

/// Read-only access to an Airtable account
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// List bases visible to the credential (first page only)
    async fn list_bases(&self) -> Result<BaseList>;

    /// Tables and fields of a base
    async fn base_schema(&self, base_id: &str) -> Result<BaseSchema>;

    /// Every record of a table, across all pages
    async fn select_all(&self, base_id: &str, table: &str) -> Result<Vec<SourceRecord>>;
}
