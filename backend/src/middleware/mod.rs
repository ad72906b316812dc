//! Actix middleware shared by the HTTP adapter.

pub mod trace;

pub use trace::Trace;
