//! HTTP client for the dealer's data API.
//!
//! Endpoints:
//! - `GET /machines/` and `GET /machines/?search=<term>`
//! - `GET /machines/global-search?q=<query>`
//! - `GET /machines/clients`

use super::{BackingStore, StoreError};
use crate::config::StoreConfig;
use crate::model::{ClientStats, Machine, MachineContext};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `BackingStore` backed by the dealer's HTTP API.
pub struct HttpBackingStore {
    /// Base URL without trailing slash (e.g., "http://localhost:8001")
    base_url: String,
    /// Shared HTTP client for connection pooling
    client: Client,
    timeout_ms: u64,
}

impl HttpBackingStore {
    /// Build a store client from configuration.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        Ok(Self::with_client(config.base_url.clone(), client, timeout))
    }

    /// Create a store with a custom HTTP client (for testing).
    pub fn with_client(base_url: String, client: Client, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, ?query, "Backing store request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Timeout(self.timeout_ms)
                } else {
                    StoreError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl BackingStore for HttpBackingStore {
    async fn list_machines(&self, search: Option<&str>) -> Result<Vec<Machine>, StoreError> {
        match search {
            Some(term) => self.get_json("/machines/", &[("search", term)]).await,
            None => self.get_json("/machines/", &[]).await,
        }
    }

    async fn search_context(&self, query: &str) -> Result<Vec<MachineContext>, StoreError> {
        self.get_json("/machines/global-search", &[("q", query)]).await
    }

    async fn list_clients(&self) -> Result<Vec<ClientStats>, StoreError> {
        self.get_json("/machines/clients", &[]).await
    }
}
