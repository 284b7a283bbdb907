//! Transport seam for the query client.

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;

use super::types::{QueryError, QueryKey};

/// Fetches the JSON document behind a query key.
#[async_trait]
pub trait QueryFetcher: Send + Sync {
    /// Returns the name of the fetcher.
    fn name(&self) -> &str;

    async fn fetch(&self, key: &QueryKey) -> Result<Value, QueryError>;
}

/// `GET {base_url}{key}` over HTTP.
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, key: &QueryKey) -> String {
        format!("{}{}", self.base_url, key.as_str())
    }
}

#[async_trait]
impl QueryFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, key: &QueryKey) -> Result<Value, QueryError> {
        let url = self.url_for(key);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GET {} failed: {} - {}", url, status, message);
            return Err(QueryError::Api { status, message });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))
    }
}
