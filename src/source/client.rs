//! Airtable REST client

use super::types::{BaseList, BaseSchema, RecordPage, SourceRecord};
use super::SourceApi;
use crate::auth::Credential;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{NextPage, OffsetTokenPaginator, PaginationState};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Airtable client over the shared HTTP client
#[derive(Debug)]
pub struct AirtableClient {
    http: HttpClient,
    api_url: Url,
    page_size: Option<u32>,
}

impl AirtableClient {
    /// Create a client for the given config and credential
    pub fn new(config: &SourceConfig, credential: Credential) -> Result<Self> {
        config.validate()?;
        if credential.is_empty() {
            return Err(Error::missing_field("api_token"));
        }

        let api_url = Url::parse(config.api_url.trim_end_matches('/'))?;
        let http = HttpClient::with_credential(config.http_config(), credential)?;

        Ok(Self {
            http,
            api_url,
            page_size: config.page_size,
        })
    }

    /// API URL with the given path segments appended (each percent-encoded)
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("API URL '{}' cannot be a base", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a metadata endpoint, mapping access failures to `SourceAccess`
    async fn get_metadata<T: DeserializeOwned>(&self, url: &Url, endpoint: &str) -> Result<T> {
        let body = match self.http.get_text(url.as_str(), RequestConfig::new()).await {
            Ok(body) => body,
            Err(Error::HttpStatus { status, body }) if matches!(status, 401 | 403 | 404) => {
                return Err(Error::source_access(status, body));
            }
            Err(e) => return Err(e),
        };

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| Error::decode(endpoint, format!("invalid JSON: {e}")))?;

        // The metadata API has been seen answering 200 with an error body
        if value.get("error").is_some() {
            return Err(Error::source_access(200, body));
        }

        serde_json::from_value(value).map_err(|e| Error::decode(endpoint, e.to_string()))
    }
}

#[async_trait]
impl SourceApi for AirtableClient {
    async fn list_bases(&self) -> Result<BaseList> {
        let url = self.endpoint(&["meta", "bases"])?;
        let list: BaseList = self.get_metadata(&url, "base list").await?;

        if list.is_truncated() {
            warn!(
                "Base list truncated after {} bases; enter the base ID manually if yours is missing",
                list.bases.len()
            );
        }

        Ok(list)
    }

    async fn base_schema(&self, base_id: &str) -> Result<BaseSchema> {
        let url = self.endpoint(&["meta", "bases", base_id, "tables"])?;
        let schema: BaseSchema = self
            .get_metadata(&url, &format!("schema of base {base_id}"))
            .await?;
        debug!("Base {} has {} tables", base_id, schema.tables.len());
        Ok(schema)
    }

    async fn select_all(&self, base_id: &str, table: &str) -> Result<Vec<SourceRecord>> {
        let url = self.endpoint(&[base_id, table])?;
        let endpoint = format!("records of table '{table}'");
        let paginator = OffsetTokenPaginator::default();
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            let mut request = RequestConfig::new();
            if let Some(size) = self.page_size {
                request = request.query("pageSize", size.to_string());
            }
            for (key, value) in paginator.params(&state) {
                request = request.query(key, value);
            }

            let body = self.http.get_text(url.as_str(), request).await?;
            let page: RecordPage =
                serde_json::from_str(&body).map_err(|e| Error::decode(&endpoint, e.to_string()))?;

            let next = paginator
                .process_page(page.records.len(), page.offset.as_deref(), &mut state)
                .map_err(|e| match e {
                    Error::Other(message) => Error::decode(&endpoint, message),
                    other => other,
                })?;
            records.extend(page.records);

            if let NextPage::Done = next {
                break;
            }
        }

        info!(
            "Fetched {} records from '{}' in {} pages",
            records.len(),
            table,
            state.pages
        );
        Ok(records)
    }
}
