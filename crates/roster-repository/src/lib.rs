//! # Roster Repository
//!
//! Durable user storage behind the [`UserRepository`] trait.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository        (SQLx, MySQL)
//! InMemoryUserRepository     (process-local, tests and demos)
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
