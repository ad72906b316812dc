//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DocumentNumberCommand, DocumentNumberQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub document_numbers: Arc<dyn DocumentNumberCommand>,
    pub document_numbers_query: Arc<dyn DocumentNumberQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use docket::domain::DocumentNumberService;
    /// use docket::domain::ports::FixtureLoginService;
    /// use docket::inbound::http::state::HttpState;
    /// use docket::outbound::memory::InMemoryCounterStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(DocumentNumberService::new(
    ///     Arc::new(InMemoryCounterStore::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        document_numbers: Arc<dyn DocumentNumberCommand>,
        document_numbers_query: Arc<dyn DocumentNumberQuery>,
    ) -> Self {
        Self {
            login,
            document_numbers,
            document_numbers_query,
        }
    }
}
