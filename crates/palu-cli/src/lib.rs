//! palu-cli library root.
//!
//! Exposes configuration, AWS wiring and the terminal interview loop so
//! that integration tests can exercise them without going through the
//! `palu` binary.

pub mod aws;
pub mod config;
pub mod interview;
