//! Process-local user store.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{
    Direction, Page, PageRequest, RosterError, RosterResult, SortField, User, UserId, UserInput,
};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    last_id: i64,
}

/// In-memory [`UserRepository`] with auto-increment ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUserRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `users`, keeping their ids.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        {
            let mut inner = repo.inner.write();
            for user in users {
                inner.last_id = inner.last_id.max(user.id.into_inner());
                inner.users.insert(user.id, user);
            }
        }
        repo
    }

    fn paginate(mut users: Vec<User>, page: PageRequest) -> RosterResult<Page<User>> {
        let offset = page.offset()?;
        users.sort_by(|a, b| {
            let ordering = match page.sort.field {
                SortField::Id => a.id.cmp(&b.id),
            };
            match page.sort.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });

        let total = users.len() as u64;
        let content = users
            .into_iter()
            .skip(offset)
            .take(page.limit())
            .collect();
        Ok(Page::new(content, page.page, page.size, total))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.inner.read().users.get(&id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> RosterResult<Page<User>> {
        let users = self.inner.read().users.values().cloned().collect();
        Self::paginate(users, page)
    }

    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>> {
        let users = self
            .inner
            .read()
            .users
            .values()
            .filter(|u| u.name_contains_ignore_case(fragment))
            .cloned()
            .collect();
        Self::paginate(users, page)
    }

    async fn save(&self, input: &UserInput) -> RosterResult<User> {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let user = input.clone().into_user(UserId::new(inner.last_id));
        inner.users.insert(user.id, user.clone());
        debug!("Inserted user {}", user.id);
        Ok(user)
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        let mut inner = self.inner.write();
        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or_else(|| RosterError::not_found("User", user.id))?;
        stored.clone_from(user);
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.inner.write().users.remove(&id).is_some())
    }

    async fn count(&self) -> RosterResult<u64> {
        Ok(self.inner.read().users.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryUserRepository {
        InMemoryUserRepository::with_users(vec![
            User::new(UserId::new(1), "Alice", "alice@example.com"),
            User::new(UserId::new(2), "Bob", "bob@example.com"),
            User::new(UserId::new(3), "Malina", "malina@example.com"),
        ])
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.save(&UserInput::new("A", "a@example.com")).await.unwrap();
        let second = repo.save(&UserInput::new("B", "b@example.com")).await.unwrap();

        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_continues_after_seeded_ids() {
        let repo = seeded();
        let user = repo.save(&UserInput::new("Dan", "dan@example.com")).await.unwrap();
        assert_eq!(user.id, UserId::new(4));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_by_id(UserId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_id_desc() {
        let repo = seeded();
        let page = repo.find_all(PageRequest::new(0, 10)).await.unwrap();

        let ids: Vec<i64> = page.content.iter().map(|u| u.id.into_inner()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(page.total_elements(), 3);
    }

    #[tokio::test]
    async fn test_find_all_with_pagination() {
        let repo = seeded();

        let page = repo.find_all(PageRequest::new(0, 2)).await.unwrap();
        assert_eq!(page.content.len(), 2);
        assert!(!page.info.last);

        let page2 = repo.find_all(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page2.content.len(), 1);
        assert_eq!(page2.content[0].id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_find_all_page_past_end_is_empty() {
        let repo = seeded();
        let page = repo.find_all(PageRequest::new(5, 10)).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements(), 3);
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let repo = seeded();
        let page = repo
            .find_by_name_containing_ignore_case("LI", PageRequest::new(0, 10))
            .await
            .unwrap();

        let names: Vec<&str> = page.content.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Malina", "Alice"]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_rejected() {
        let repo = seeded();
        let page = PageRequest::from_one_based(Some(4_294_967_298), Some(4_294_967_297));

        let err = repo.find_all(page).await.unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));

        let err = repo
            .find_by_name_containing_ignore_case("a", page)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_existing_user() {
        let repo = seeded();
        let updated = User::new(UserId::new(2), "Robert", "robert@example.com");

        repo.update(&updated).await.unwrap();

        let found = repo.find_by_id(UserId::new(2)).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_update_missing_user_fails() {
        let repo = InMemoryUserRepository::new();
        let err = repo
            .update(&User::new(UserId::new(7), "Ghost", "ghost@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = seeded();

        assert!(repo.delete_by_id(UserId::new(1)).await.unwrap());
        assert!(!repo.delete_by_id(UserId::new(1)).await.unwrap());
        assert!(repo.find_by_id(UserId::new(1)).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
