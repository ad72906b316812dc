//! Builders wiring the counter store and clock into HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use docket::domain::DocumentNumberService;
use docket::domain::ports::{CounterStore, FixtureLoginService};
use docket::inbound::http::state::HttpState;
use docket::outbound::memory::InMemoryCounterStore;
use docket::outbound::persistence::DieselCounterStore;

use super::ServerConfig;

fn state_for_store<S>(store: S, clock: Arc<dyn Clock>) -> HttpState
where
    S: CounterStore + 'static,
{
    let service = Arc::new(DocumentNumberService::new(Arc::new(store), clock));
    HttpState::new(Arc::new(FixtureLoginService), service.clone(), service)
}

/// Build handler state, persisting counters in PostgreSQL when a pool is
/// configured and in process memory otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!(
                max_attempts = config.counter_max_attempts,
                "using PostgreSQL counter store"
            );
            let store = DieselCounterStore::new(pool.clone())
                .with_max_attempts(config.counter_max_attempts);
            state_for_store(store, clock)
        }
        None => {
            info!("using in-memory counter store; counters reset on restart");
            state_for_store(InMemoryCounterStore::new(), clock)
        }
    }
}
