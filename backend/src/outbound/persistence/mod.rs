//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! # Architecture
//!
//! - **Thin adapters**: store implementations only translate between Diesel
//!   models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Async-safe pooling**: connections come from a `bb8` pool through
//!   `diesel-async`.
//! - **Strongly typed errors**: database errors are mapped to
//!   [`CounterStoreError`](crate::domain::ports::CounterStoreError).
//!
//! # Example
//!
//! ```no_run
//! use docket::outbound::persistence::{DbPool, DieselCounterStore, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/docket")).await?;
//! let store = DieselCounterStore::new(pool).with_max_attempts(5);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_counter_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_counter_store::DieselCounterStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
