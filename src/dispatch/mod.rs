//! Query dispatcher (the "tour assistant").
//!
//! Turns a free-text utterance into a situational report and replaces the
//! Working Machine Set with the matching machines. Each utterance is handled
//! independently; the only state touched is the Working Machine Set.

pub mod summary;

pub use summary::{summarize, truncate_reason, StatusBuckets, EMPTY_UTTERANCE, SEARCH_FAILED};

use crate::config::DispatchConfig;
use crate::store::SharedStore;
use crate::working_set::{WorkingSet, WorkingSetSource, WorkingSnapshot};
use std::sync::Arc;

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Results found; the working set now holds them
    Matched { count: usize },
    /// Search succeeded with no result; the working set is now empty
    NoMatch,
    /// Blank utterance; nothing searched, working set untouched
    Blank,
    /// Backing search failed; working set untouched
    Failed,
}

/// Reply to one utterance.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub summary: String,
    pub status: DispatchStatus,
    /// Working set after the dispatch
    pub working_set: Arc<WorkingSnapshot>,
}

pub struct QueryDispatcher {
    store: SharedStore,
    config: DispatchConfig,
}

impl QueryDispatcher {
    pub fn new(store: SharedStore, config: DispatchConfig) -> Self {
        Self { store, config }
    }

    /// Search for `utterance`, summarize, and replace `working_set` with the results.
    ///
    /// Never fails: a backing-store error yields [`SEARCH_FAILED`] and leaves
    /// `working_set` as it was.
    pub async fn dispatch(&self, utterance: &str, working_set: &WorkingSet) -> DispatchOutcome {
        let term = utterance.trim();
        if term.is_empty() {
            return DispatchOutcome {
                summary: EMPTY_UTTERANCE.to_string(),
                status: DispatchStatus::Blank,
                working_set: working_set.snapshot(),
            };
        }

        metrics::counter!("fleetscope_dispatch_total").increment(1);
        let machines = match self.store.list_machines(Some(utterance)).await {
            Ok(machines) => machines,
            Err(e) => {
                metrics::counter!("fleetscope_dispatch_failures_total").increment(1);
                tracing::warn!(
                    utterance = %term,
                    error = %e,
                    "Dispatch search failed, keeping working set"
                );
                return DispatchOutcome {
                    summary: SEARCH_FAILED.to_string(),
                    status: DispatchStatus::Failed,
                    working_set: working_set.snapshot(),
                };
            }
        };

        let summary = summarize(term, &machines, &self.config);
        let status = if machines.is_empty() {
            DispatchStatus::NoMatch
        } else {
            DispatchStatus::Matched {
                count: machines.len(),
            }
        };
        tracing::info!(utterance = %term, results = machines.len(), "Query dispatched");

        working_set.replace(
            machines,
            WorkingSetSource::Query {
                utterance: term.to_string(),
            },
        );

        DispatchOutcome {
            summary,
            status,
            working_set: working_set.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientStats, Machine, MachineContext, MachineStatus};
    use crate::store::{BackingStore, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedStore {
        machines: Result<Vec<Machine>, ()>,
        searches: Mutex<Vec<Option<String>>>,
    }

    impl FixedStore {
        fn ok(machines: Vec<Machine>) -> Arc<Self> {
            Arc::new(Self {
                machines: Ok(machines),
                searches: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                machines: Err(()),
                searches: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl BackingStore for FixedStore {
        async fn list_machines(&self, search: Option<&str>) -> Result<Vec<Machine>, StoreError> {
            self.searches.lock().unwrap().push(search.map(str::to_string));
            self.machines
                .clone()
                .map_err(|_| StoreError::Network("connection reset".to_string()))
        }

        async fn search_context(&self, _query: &str) -> Result<Vec<MachineContext>, StoreError> {
            Ok(Vec::new())
        }

        async fn list_clients(&self) -> Result<Vec<ClientStats>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn fleet(n: i64, status: MachineStatus) -> Vec<Machine> {
        (0..n)
            .map(|i| Machine::new(i, format!("SN-{}", i), "GCO", status))
            .collect()
    }

    #[tokio::test]
    async fn test_dispatch_replaces_working_set_with_all_results() {
        let mut results = fleet(7, MachineStatus::Critical);
        results.extend(fleet(3, MachineStatus::Operational));
        let store = FixedStore::ok(results);
        let dispatcher = QueryDispatcher::new(store.clone(), DispatchConfig::default());
        let working_set = WorkingSet::new();
        working_set.replace(
            fleet(50, MachineStatus::Maintenance),
            WorkingSetSource::Filtered { active_filters: 0 },
        );

        let outcome = dispatcher.dispatch("Client GCO", &working_set).await;

        assert_eq!(outcome.status, DispatchStatus::Matched { count: 10 });
        assert_eq!(outcome.working_set.machines.len(), 10);
        assert_eq!(
            outcome.working_set.source,
            WorkingSetSource::Query {
                utterance: "Client GCO".to_string()
            }
        );
        assert!(outcome.summary.contains("et 2 autres."));
        assert_eq!(
            store.searches.lock().unwrap().as_slice(),
            &[Some("Client GCO".to_string())]
        );
    }

    #[tokio::test]
    async fn test_dispatch_failure_preserves_working_set() {
        let dispatcher = QueryDispatcher::new(FixedStore::failing(), DispatchConfig::default());
        let working_set = WorkingSet::new();
        let revision = working_set.replace(
            fleet(4, MachineStatus::Operational),
            WorkingSetSource::Filtered { active_filters: 1 },
        );

        let outcome = dispatcher.dispatch("gco", &working_set).await;

        assert_eq!(outcome.status, DispatchStatus::Failed);
        assert_eq!(outcome.summary, SEARCH_FAILED);
        let snapshot = working_set.snapshot();
        assert_eq!(snapshot.revision, revision);
        assert_eq!(snapshot.machines.len(), 4);
    }

    #[tokio::test]
    async fn test_dispatch_no_match_empties_working_set() {
        let dispatcher =
            QueryDispatcher::new(FixedStore::ok(Vec::new()), DispatchConfig::default());
        let working_set = WorkingSet::new();
        working_set.replace(
            fleet(4, MachineStatus::Operational),
            WorkingSetSource::Filtered { active_filters: 0 },
        );

        let outcome = dispatcher.dispatch("nowhere", &working_set).await;

        assert_eq!(outcome.status, DispatchStatus::NoMatch);
        assert!(outcome.summary.starts_with("Aucune machine"));
        assert!(working_set.is_empty());
    }

    #[tokio::test]
    async fn test_blank_utterance_does_not_search() {
        let store = FixedStore::ok(fleet(2, MachineStatus::Operational));
        let dispatcher = QueryDispatcher::new(store.clone(), DispatchConfig::default());
        let working_set = WorkingSet::new();

        let outcome = dispatcher.dispatch("   ", &working_set).await;

        assert_eq!(outcome.status, DispatchStatus::Blank);
        assert_eq!(outcome.summary, EMPTY_UTTERANCE);
        assert!(store.searches.lock().unwrap().is_empty());
        assert_eq!(working_set.snapshot().revision, 0);
    }
}
