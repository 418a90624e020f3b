//! palu-triage
//!
//! Interactive triage sessions: one question at a time until the interview
//! is complete, then a final authoritative result from the engine.
//!
//! [`session`] holds the pure state transitions. [`service::TriageService`]
//! runs them against a [`store::SessionStore`] and records the derived
//! diagnostic through a [`store::DiagnosticStore`].

pub mod error;
pub mod memory;
pub mod service;
pub mod session;
pub mod store;
