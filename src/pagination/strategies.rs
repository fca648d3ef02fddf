//! Offset-token pagination

use super::types::{NextPage, PaginationState};
use crate::error::{Error, Result};

/// Follows Airtable's `offset` continuation token
#[derive(Debug, Clone)]
pub struct OffsetTokenPaginator {
    /// Query parameter name for the token
    pub offset_param: String,
}

impl Default for OffsetTokenPaginator {
    fn default() -> Self {
        Self::new("offset")
    }
}

impl OffsetTokenPaginator {
    /// Create a new paginator
    pub fn new(offset_param: impl Into<String>) -> Self {
        Self {
            offset_param: offset_param.into(),
        }
    }

    /// Query parameters for the next request
    pub fn params(&self, state: &PaginationState) -> Vec<(String, String)> {
        state
            .cursor
            .iter()
            .map(|cursor| (self.offset_param.clone(), cursor.clone()))
            .collect()
    }

    /// Record a page and decide whether another request is needed.
    ///
    /// A token equal to the one just sent is an error.
    pub fn process_page(
        &self,
        records_count: usize,
        next_offset: Option<&str>,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_page(records_count as u64);

        match next_offset {
            Some(offset) if !offset.is_empty() => {
                if state.cursor.as_deref() == Some(offset) {
                    return Err(Error::Other(format!(
                        "offset token '{offset}' repeated after {} pages",
                        state.pages
                    )));
                }
                state.set_cursor(offset.to_string());
                Ok(NextPage::with_offset(offset))
            }
            _ => {
                state.mark_done();
                Ok(NextPage::Done)
            }
        }
    }
}
