//! # Roster Service
//!
//! User operations with a cache-aside layer in front of the store.
//! Reads consult the cache first, updates write through and deletes
//! invalidate; list queries always go to the store.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod settings;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use settings::*;
pub use user_service::*;
