//! Fleetscope - fleet query-and-visualization engine
//!
//! This library holds the core of a heavy-equipment fleet dashboard: structured
//! filter state, derivation of the visible machine set, debounced context
//! search against the dealer's data API, free-text query summaries and
//! map viewport synchronization.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod filter;
pub mod logging;
pub mod model;
pub mod proximity;
pub mod search;
pub mod session;
pub mod store;
pub mod viewport;
pub mod working_set;
