//! HTTP chat query adapter

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{QueryClient, QueryError};

/// Client for the backend chat endpoint.
///
/// The question travels as a URL path segment
/// (`GET <endpoint>/api/chat/<query>`); the answer is the raw response
/// body, displayed verbatim.
pub struct HttpQueryClient {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpQueryClient {
    /// Create a client for the given backend base URL
    pub fn new(endpoint: &str) -> Result<Self, QueryError> {
        let base = reqwest::Url::parse(endpoint)
            .map_err(|_| QueryError::InvalidUrl(endpoint.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    /// Build the chat URL for a query, percent-encoding the text
    fn chat_url(&self, query: &str) -> Result<reqwest::Url, QueryError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| QueryError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["api", "chat", query]);
        Ok(url)
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn ask(&self, query: &str) -> Result<String, QueryError> {
        let url = self.chat_url(query)?;
        debug!(%url, "sending chat query");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| QueryError::InvalidResponse(e.to_string()))
    }
}
