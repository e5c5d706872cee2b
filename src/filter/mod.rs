//! Structured fleet filters.
//!
//! `FilterStore` is the session-scoped container for the active filter. It is
//! owned by the dashboard session and lent to whoever reads or writes it; there
//! is no global filter state.

mod derive;
mod facets;
#[cfg(test)]
mod tests;

pub use derive::derive_visible;
pub use facets::{client_facets, filter_facets};

use crate::model::MachineStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The active structured filter.
///
/// An empty set means "no constraint" on that dimension. Dimensions combine
/// with AND, values inside a dimension with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub status: BTreeSet<MachineStatus>,
    pub regions: BTreeSet<String>,
    pub clients: BTreeSet<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.regions.is_empty() && self.clients.is_empty()
    }
}

/// A partial update. Dimensions left as `None` are untouched by `set_filters`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub status: Option<BTreeSet<MachineStatus>>,
    pub regions: Option<BTreeSet<String>>,
    pub clients: Option<BTreeSet<String>>,
}

impl FilterUpdate {
    pub fn status(mut self, values: impl IntoIterator<Item = MachineStatus>) -> Self {
        self.status = Some(values.into_iter().collect());
        self
    }

    pub fn regions<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.regions = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn clients<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.clients = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Session-scoped filter container.
///
/// # Examples
///
/// ```
/// use fleetscope::filter::{FilterStore, FilterUpdate};
/// use fleetscope::model::MachineStatus;
///
/// let mut store = FilterStore::new();
/// store.set_filters(FilterUpdate::default().status([MachineStatus::Critical]));
/// store.set_filters(FilterUpdate::default().clients(["GCO", "Sabodala"]));
/// assert_eq!(store.active_count(), 3);
///
/// store.reset_filters();
/// assert_eq!(store.active_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter state.
    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    /// Shallow merge: every dimension named in `update` is replaced wholesale.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.state.status = status;
        }
        if let Some(regions) = update.regions {
            self.state.regions = regions;
        }
        if let Some(clients) = update.clients {
            self.state.clients = clients;
        }
        tracing::debug!(active = self.active_count(), "Filters updated");
    }

    /// Restore the all-empty state.
    pub fn reset_filters(&mut self) {
        self.state = FilterState::default();
        tracing::debug!("Filters reset");
    }

    /// Number of selected values across all dimensions (badge count).
    pub fn active_count(&self) -> usize {
        self.state.status.len() + self.state.regions.len() + self.state.clients.len()
    }

    /// Checkbox semantics: add the status if absent, remove it if present.
    pub fn toggle_status(&mut self, status: MachineStatus) {
        let mut values = self.state.status.clone();
        if !values.remove(&status) {
            values.insert(status);
        }
        self.set_filters(FilterUpdate {
            status: Some(values),
            ..Default::default()
        });
    }

    pub fn toggle_client(&mut self, client: &str) {
        let clients = toggled(&self.state.clients, client);
        self.set_filters(FilterUpdate {
            clients: Some(clients),
            ..Default::default()
        });
    }

    pub fn toggle_region(&mut self, region: &str) {
        let regions = toggled(&self.state.regions, region);
        self.set_filters(FilterUpdate {
            regions: Some(regions),
            ..Default::default()
        });
    }
}

fn toggled(current: &BTreeSet<String>, value: &str) -> BTreeSet<String> {
    let mut values = current.clone();
    if !values.remove(value) {
        values.insert(value.to_string());
    }
    values
}
