//! Pagination module
//!
//! Airtable list endpoints return an opaque `offset` token while more pages
//! remain. The records client follows it until exhausted; the base listing
//! deliberately reads only the first page.

mod strategies;
mod types;

pub use strategies::OffsetTokenPaginator;
pub use types::{NextPage, PaginationState};
