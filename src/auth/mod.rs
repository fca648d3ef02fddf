//! Authentication module
//!
//! The only supported credential is an opaque Airtable token (personal
//! access token or OAuth access token) sent as a bearer header. It is kept
//! apart from the connection state, the way the host keeps its password
//! field apart from connection data.

use reqwest::RequestBuilder;

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, trimming surrounding whitespace
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(token.as_ref().trim().to_string())
    }

    /// Parse an `Authorization` header value (`Bearer <token>`)
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let credential = Self::new(token);
        (!credential.is_empty()).then_some(credential)
    }

    /// The raw token
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply the credential to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
