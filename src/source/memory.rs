//! In-memory source for offline runs and tests

use super::types::{BaseList, BaseSchema, SourceRecord, TableMeta};
use super::SourceApi;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed set of bases, tables and records
#[derive(Debug, Default)]
pub struct MemorySource {
    bases: BaseList,
    schemas: HashMap<String, BaseSchema>,
    records: HashMap<(String, String), Vec<SourceRecord>>,
    requests: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base listing
    #[must_use]
    pub fn with_bases(mut self, bases: BaseList) -> Self {
        self.bases = bases;
        self
    }

    /// Add a table (metadata only) to a base
    #[must_use]
    pub fn with_table(mut self, base_id: &str, table: TableMeta) -> Self {
        self.schemas
            .entry(base_id.to_string())
            .or_default()
            .tables
            .push(table);
        self
    }

    /// Set the records of a table
    #[must_use]
    pub fn with_records(mut self, base_id: &str, table: &str, records: Vec<SourceRecord>) -> Self {
        self.records
            .insert((base_id.to_string(), table.to_string()), records);
        self
    }

    /// Number of API calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceApi for MemorySource {
    async fn list_bases(&self) -> Result<BaseList> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.bases.clone())
    }

    async fn base_schema(&self, base_id: &str) -> Result<BaseSchema> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.schemas.get(base_id).cloned().ok_or_else(|| {
            Error::source_access(404, format!(r#"{{"error":"NOT_FOUND","base":"{base_id}"}}"#))
        })
    }

    async fn select_all(&self, base_id: &str, table: &str) -> Result<Vec<SourceRecord>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(&(base_id.to_string(), table.to_string()))
            .cloned()
            .ok_or_else(|| Error::http_status(404, format!("table '{table}' not found")))
    }
}
