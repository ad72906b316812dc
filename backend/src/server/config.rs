//! HTTP server configuration object and helpers.

use docket::inbound::http::session_config::SessionSettings;
use docket::outbound::persistence::{DbPool, DieselCounterStore};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) counter_max_attempts: u32,
}

impl ServerConfig {
    /// Construct a server configuration with an in-memory counter store.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: (String, u16)) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            counter_max_attempts: DieselCounterStore::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Persist counters in PostgreSQL through the given pool.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Bound the attempts per counter transaction.
    #[must_use]
    pub fn with_counter_max_attempts(mut self, attempts: u32) -> Self {
        self.counter_max_attempts = attempts;
        self
    }
}
