//! Backing-store abstraction.
//!
//! The backing store owns machine, client and intervention records. This module
//! provides the `BackingStore` trait consumed by the engine, an HTTP client
//! implementation, and the degrade-to-empty wrappers used by components that
//! only need data and must never surface a transport failure.

use async_trait::async_trait;
use std::sync::Arc;

pub mod error;
pub mod http;

pub use error::StoreError;
pub use http::HttpBackingStore;

use crate::model::{ClientStats, Machine, MachineContext};

/// Read-only view of the fleet records.
///
/// Implementations are shared as `Arc<dyn BackingStore>`. The matching rule
/// for `search` terms is owned by the implementation and opaque to callers.
#[async_trait]
pub trait BackingStore: Send + Sync + 'static {
    /// Full roster when `search` is `None`, otherwise machines whose serial,
    /// client or model match the term.
    async fn list_machines(&self, search: Option<&str>) -> Result<Vec<Machine>, StoreError>;

    /// Rich per-machine snapshot (program status included) for the autocomplete panel.
    async fn search_context(&self, query: &str) -> Result<Vec<MachineContext>, StoreError>;

    /// Distinct client names with machine counts.
    async fn list_clients(&self) -> Result<Vec<ClientStats>, StoreError>;
}

pub type SharedStore = Arc<dyn BackingStore>;

fn record_failure(operation: &'static str, error: &StoreError) {
    metrics::counter!("fleetscope_store_failures_total", "operation" => operation).increment(1);
    tracing::warn!(operation, error = %error, "Backing store call failed, using empty result");
}

/// `list_machines`, degraded to an empty list on failure.
pub async fn machines_or_empty(store: &dyn BackingStore, search: Option<&str>) -> Vec<Machine> {
    match store.list_machines(search).await {
        Ok(machines) => machines,
        Err(e) => {
            record_failure("list_machines", &e);
            Vec::new()
        }
    }
}

/// `search_context`, degraded to an empty list on failure.
pub async fn context_or_empty(store: &dyn BackingStore, query: &str) -> Vec<MachineContext> {
    match store.search_context(query).await {
        Ok(results) => results,
        Err(e) => {
            record_failure("search_context", &e);
            Vec::new()
        }
    }
}

/// `list_clients`, degraded to an empty list on failure.
pub async fn clients_or_empty(store: &dyn BackingStore) -> Vec<ClientStats> {
    match store.list_clients().await {
        Ok(clients) => clients,
        Err(e) => {
            record_failure("list_clients", &e);
            Vec::new()
        }
    }
}
