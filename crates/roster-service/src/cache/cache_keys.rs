//! Cache key generators.

use roster_core::UserId;

/// Prefix of per-user cache keys.
pub const USER_PREFIX: &str = "user_";

/// Generate the cache key for a user by ID, e.g. `user_42`.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{}{}", USER_PREFIX, id)
}
