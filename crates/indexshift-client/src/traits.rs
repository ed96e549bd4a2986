//! IndexClient trait definition

use crate::error::ClientResult;
use async_trait::async_trait;

/// Body encoding of a POST request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/x-ndjson`, used by the bulk endpoint
    NdJson,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::NdJson => "application/x-ndjson",
        }
    }
}

/// Status and raw body of a search-engine response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexResponse {
    pub status: u16,
    pub body: String,
}

impl IndexResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` when the status is exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Search-engine REST client used by migration steps.
///
/// Paths are relative to the configured address (`_aliases`,
/// `context-event/_mapping`, ...). Implementations must be Send + Sync
/// for async operation.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Issue a GET request
    async fn get(&self, path: &str) -> ClientResult<IndexResponse>;

    /// Issue a PUT request with a JSON body
    async fn put(&self, path: &str, body: &str) -> ClientResult<IndexResponse>;

    /// Issue a POST request
    async fn post(
        &self,
        path: &str,
        body: &str,
        content_type: ContentType,
    ) -> ClientResult<IndexResponse>;

    /// Base address, for log lines
    fn address(&self) -> &str;
}
