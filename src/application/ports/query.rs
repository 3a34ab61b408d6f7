//! Chat query port interface

use async_trait::async_trait;
use thiserror::Error;

/// Query errors
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Query failed: HTTP {0}")]
    Status(u16),

    #[error("Unable to parse response: {0}")]
    InvalidResponse(String),
}

/// Port for the backend chat/query service.
///
/// Thin boundary: the request is a URL-embedded string, the response is
/// raw text displayed verbatim.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Send a free-text question and return the answer body.
    async fn ask(&self, query: &str) -> Result<String, QueryError>;
}
