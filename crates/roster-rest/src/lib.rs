//! # Roster REST
//!
//! HTTP surface of the user service using Axum: user CRUD and listing under
//! `/api/users`, health probes and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
