//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Page, PageRequest, RosterResult, User, UserId, UserInput};

/// Durable user store.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` always means the
/// store itself failed.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> RosterResult<Page<User>>;

    /// Finds users whose name contains `fragment`, ignoring case.
    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>>;

    /// Inserts a new user; the store assigns the id.
    async fn save(&self, input: &UserInput) -> RosterResult<User>;

    /// Overwrites an existing user's fields by id.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Deletes a user by ID, returning whether a row was removed.
    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool>;

    /// Counts all users.
    async fn count(&self) -> RosterResult<u64>;
}
