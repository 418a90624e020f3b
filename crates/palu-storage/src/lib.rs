//! palu-storage
//!
//! S3 persistence for triage sessions and diagnostics. Thin wrapper around
//! the AWS S3 SDK; session writes use ETag optimistic locking.

pub mod client;
pub mod error;
pub mod objects;
pub mod state;
pub mod store;
