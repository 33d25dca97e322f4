//! User service trait definition.

use crate::cache::CacheEnvelope;
use crate::dto::{UserListQuery, UserView};
use async_trait::async_trait;
use roster_core::{Page, RosterResult, User, UserId, UserInput};

/// User operations backed by the store with a cache-aside layer.
///
/// A missing user is `Ok(None)`, never an error.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets a user by ID, consulting the cache first.
    async fn get_user(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Inserts a new user. The cache is not touched.
    async fn create_user(&self, input: UserInput) -> RosterResult<User>;

    /// Overwrites a user's name and email and refreshes its cache entry.
    async fn update_user(&self, id: UserId, input: UserInput) -> RosterResult<Option<User>>;

    /// Deletes a user and evicts its cache entry.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;

    /// Lists users from the store, newest first.
    async fn list_users(&self, query: UserListQuery) -> RosterResult<Vec<UserView>> {
        Ok(self.list_users_page(query).await?.content)
    }

    /// Lists users from the store with page totals.
    async fn list_users_page(&self, query: UserListQuery) -> RosterResult<Page<UserView>>;

    /// Stores `value` under `key` with the configured TTL.
    async fn cache_set(&self, key: &str, value: CacheEnvelope) -> RosterResult<()>;

    /// Reads the value under `key`.
    async fn cache_get(&self, key: &str) -> RosterResult<Option<CacheEnvelope>>;

    /// Removes `key`, returning whether it was present.
    async fn cache_delete(&self, key: &str) -> RosterResult<bool>;
}
