//! HTTP client module
//!
//! Thin reqwest wrapper used by the Airtable client.
//!
//! # Features
//!
//! - **Bearer credential**: applied to every request
//! - **Rate Limiting**: token bucket limiter using governor
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//!
//! Requests are never retried; a failed call fails the whole operation.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
