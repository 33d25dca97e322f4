//! Typed values stored in the cache.

use roster_core::{User, UserId};
use serde::{Deserialize, Serialize};

/// A value held under a cache key.
///
/// Encoded as `{"kind": "...", "value": ...}` so a reader can tell a cached
/// user apart from arbitrary data written through the generic helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CacheEnvelope {
    /// A user record.
    User(User),
    /// Plain text.
    Text(String),
    /// Arbitrary JSON.
    Json(serde_json::Value),
}

impl CacheEnvelope {
    /// Returns the variant name as written in the `kind` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::Text(_) => "text",
            Self::Json(_) => "json",
        }
    }

    /// Returns the user if this envelope holds the record for `id`.
    #[must_use]
    pub fn into_user_for(self, id: UserId) -> Option<User> {
        match self {
            Self::User(user) if user.id == id => Some(user),
            _ => None,
        }
    }
}

impl From<User> for CacheEnvelope {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}
