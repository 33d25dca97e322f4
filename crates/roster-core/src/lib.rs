//! # Roster Core
//!
//! Core types, traits, and error definitions for Roster.
//! Every other crate in the workspace builds on the error taxonomy,
//! typed identifiers, pagination types and the `User` entity defined here.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
