//! Fleet data model.
//!
//! Read-only snapshots of the records owned by the backing store: machines,
//! their pending interventions, and the richer per-machine context returned
//! by the global search endpoint.

mod context;
mod machine;

pub use context::*;
pub use machine::*;
