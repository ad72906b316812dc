//! In-process adapters for single-node deployments and tests.
//!
//! State lives only as long as the process; nothing survives a restart.

mod counter_store;

pub use counter_store::InMemoryCounterStore;
