//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`CounterStore`]) expose strongly typed errors so adapters
//! map their failures into predictable variants. Driving ports
//! ([`DocumentNumberCommand`], [`DocumentNumberQuery`], [`LoginService`]) are
//! what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod counter_store;
mod document_number_command;
mod document_number_query;
mod login_service;

#[cfg(test)]
pub use counter_store::MockCounterStore;
pub use counter_store::{CounterStore, CounterStoreError, FixtureCounterStore};
pub use document_number_command::{DocumentNumberCommand, DocumentNumberRequest};
pub use document_number_query::DocumentNumberQuery;
pub use login_service::{FixtureLoginService, LoginService};
