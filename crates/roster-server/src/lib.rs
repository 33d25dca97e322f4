//! # Roster Server Library
//!
//! Wiring of configuration, store, cache and router into a runnable
//! application, plus logging setup for the binary.

pub mod app;
pub mod startup;
pub mod telemetry;

pub use app::{build_cache, build_state, Application};
