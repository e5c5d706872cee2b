//! Debounced context search (autocomplete panel).
//!
//! State machine over the query text:
//!
//! - `Idle`: query shorter than the minimum length; results cleared, panel closed.
//! - `Pending`: query changed; a quiet-period timer is running. A further change
//!   cancels the timer and starts a new one (trailing-edge debounce).
//! - `Loading`: timer elapsed; one lookup is in flight.
//! - `Settled`: the newest lookup resolved and its results are shown.
//!
//! Every lookup takes a number from a monotonically increasing sequence. A
//! response is applied only if its number is still the latest one, so a slow
//! response can never overwrite a newer one. Going `Idle` also advances the
//! sequence, which discards whatever is still in flight.

use crate::config::SearchConfig;
use crate::model::MachineContext;
use crate::store::{context_or_empty, SharedStore};
use crate::viewport::LatLng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;


/// Where the search state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Pending,
    Loading,
    Settled,
}

/// Observable state of the search panel.
#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    /// Latest text typed by the operator
    pub query: String,
    pub phase: SearchPhase,
    pub results: Vec<MachineContext>,
    /// Query the displayed results were fetched for
    pub results_for: Option<String>,
    pub loading: bool,
    pub panel_open: bool,
}

impl SearchSnapshot {
    fn idle(query: String) -> Self {
        Self {
            query,
            phase: SearchPhase::Idle,
            results: Vec::new(),
            results_for: None,
            loading: false,
            panel_open: false,
        }
    }

    /// Nothing pending or in flight for the current query.
    pub fn is_settled(&self) -> bool {
        match self.phase {
            SearchPhase::Idle => true,
            SearchPhase::Settled => self.results_for.as_deref() == Some(self.query.as_str()),
            SearchPhase::Pending | SearchPhase::Loading => false,
        }
    }
}

/// Outcome of picking a row in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The machine has a fix; the panel was closed
    Locate(LatLng),
    /// The row shows a "no GPS" warning and offers no locate action
    NoLocation,
    /// No such row in the current results
    NotFound,
}

struct Inner {
    store: SharedStore,
    config: SearchConfig,
    state: watch::Sender<SearchSnapshot>,
    /// Number of the newest issued request or invalidation
    sequence: AtomicU64,
    /// Cancels the running quiet-period timer
    pending_timer: Mutex<Option<CancellationToken>>,
    shutdown: CancellationToken,
}

/// Debounced, race-safe lookup against `search_context`.
///
/// Must be driven from within a tokio runtime: query changes spawn the
/// quiet-period timer as a task.
pub struct ContextSearch {
    inner: Arc<Inner>,
}

impl ContextSearch {
    pub fn new(store: SharedStore, config: SearchConfig) -> Self {
        let (state, _rx) = watch::channel(SearchSnapshot::idle(String::new()));
        Self {
            inner: Arc::new(Inner {
                store,
                config,
                state,
                sequence: AtomicU64::new(0),
                pending_timer: Mutex::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.state.subscribe()
    }

    /// Feed the latest text of the search box.
    pub fn set_query(&self, text: &str) {
        let inner = &self.inner;
        let mut timer = inner
            .pending_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if text.chars().count() < inner.config.min_query_length {
            if let Some(token) = timer.take() {
                token.cancel();
            }
            inner.state.send_modify(|s| {
                inner.sequence.fetch_add(1, Ordering::SeqCst);
                *s = SearchSnapshot::idle(text.to_string());
            });
            tracing::trace!(query = %text, "Search idle");
            return;
        }

        if inner.state.borrow().query == text {
            return;
        }

        if let Some(token) = timer.take() {
            token.cancel();
        }
        let token = inner.shutdown.child_token();
        *timer = Some(token.clone());

        inner.state.send_modify(|s| {
            s.query = text.to_string();
            s.phase = SearchPhase::Pending;
        });

        let inner = Arc::clone(inner);
        let query = text.to_string();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::trace!(query = %query, "Debounce timer discarded");
                }
                _ = tokio::time::sleep(inner.config.debounce()) => {
                    inner.lookup(query).await;
                }
            }
        });
    }

    /// Reopen the panel on focus if the current query is long enough.
    pub fn focus(&self) {
        let min = self.inner.config.min_query_length;
        self.inner.state.send_if_modified(|s| {
            if s.query.chars().count() >= min && !s.panel_open {
                s.panel_open = true;
                true
            } else {
                false
            }
        });
    }

    pub fn close_panel(&self) {
        self.inner.state.send_if_modified(|s| {
            let was_open = s.panel_open;
            s.panel_open = false;
            was_open
        });
    }

    /// Pick the result row for `machine_id`.
    pub fn select(&self, machine_id: i64) -> Selection {
        let target = {
            let state = self.inner.state.borrow();
            match state.results.iter().find(|r| r.id == machine_id) {
                None => return Selection::NotFound,
                Some(result) => result.locatable().map(LatLng::from),
            }
        };

        match target {
            Some(center) => {
                self.close_panel();
                Selection::Locate(center)
            }
            None => Selection::NoLocation,
        }
    }

    /// Wait until nothing is pending or in flight for the current query.
    pub async fn settled(&self) -> SearchSnapshot {
        let mut rx = self.inner.state.subscribe();
        let result = match rx.wait_for(SearchSnapshot::is_settled).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        result
    }
}

impl Drop for ContextSearch {
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}

impl Inner {
    // Sequence reads and writes happen inside the watch write lock so they are
    // ordered with the query changes made by `set_query`.
    async fn lookup(&self, query: String) {
        let mut request = None;
        self.state.send_if_modified(|s| {
            if s.query != query {
                return false;
            }
            request = Some(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
            s.phase = SearchPhase::Loading;
            s.loading = true;
            true
        });
        let Some(request) = request else {
            tracing::trace!(query = %query, "Query changed before lookup, skipping");
            return;
        };

        metrics::counter!("fleetscope_search_lookups_total").increment(1);
        tracing::debug!(request, query = %query, "Context lookup issued");

        let results = context_or_empty(self.store.as_ref(), &query).await;
        let count = results.len();

        let applied = self.state.send_if_modified(|s| {
            if self.sequence.load(Ordering::SeqCst) != request {
                return false;
            }
            s.phase = if s.query == query {
                SearchPhase::Settled
            } else {
                SearchPhase::Pending
            };
            s.results = results;
            s.results_for = Some(query.clone());
            s.loading = false;
            s.panel_open = true;
            true
        });

        if applied {
            tracing::debug!(request, query = %query, count, "Context results applied");
        } else {
            metrics::counter!("fleetscope_search_stale_responses_total").increment(1);
            tracing::debug!(request, query = %query, "Stale context response discarded");
        }
    }
}
