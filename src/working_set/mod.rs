//! The Working Machine Set: the machines currently driving the map.
//!
//! Two producers write here: filter derivation over the roster and the query
//! dispatcher. Every write replaces the whole set; the last writer wins.
//! Renderers subscribe to the slot and redraw on change.

use crate::model::Machine;
use std::sync::Arc;
use tokio::sync::watch;

/// Which producer wrote the current set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingSetSource {
    /// Nothing written yet
    Empty,
    /// Structured filters applied to the full roster
    Filtered { active_filters: usize },
    /// Results of a free-text query
    Query { utterance: String },
}

/// Immutable view of the set at one revision.
#[derive(Debug, Clone)]
pub struct WorkingSnapshot {
    pub machines: Vec<Machine>,
    pub source: WorkingSetSource,
    /// Incremented on every replacement
    pub revision: u64,
}

/// Atomically replaced slot holding the Working Machine Set.
pub struct WorkingSet {
    tx: watch::Sender<Arc<WorkingSnapshot>>,
}

impl WorkingSet {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(WorkingSnapshot {
            machines: Vec::new(),
            source: WorkingSetSource::Empty,
            revision: 0,
        }));
        Self { tx }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<WorkingSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver notified on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkingSnapshot>> {
        self.tx.subscribe()
    }

    /// Replace the whole set. Returns the new revision.
    pub fn replace(&self, machines: Vec<Machine>, source: WorkingSetSource) -> u64 {
        let count = machines.len();
        let mut revision = 0;
        self.tx.send_modify(|current| {
            revision = current.revision + 1;
            tracing::debug!(revision, count, source = ?source, "Working machine set replaced");
            *current = Arc::new(WorkingSnapshot {
                machines,
                source,
                revision,
            });
        });
        revision
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}
