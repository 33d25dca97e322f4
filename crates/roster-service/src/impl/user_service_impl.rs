//! Cache-aside user service implementation.

use crate::cache::{cache_keys, CacheEnvelope, CacheExt, CacheInterface};
use crate::dto::{UserListQuery, UserView};
use crate::settings::{CacheFailurePolicy, CacheSettings};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{Page, PageRequest, RosterResult, User, UserId, UserInput};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User service over a store and a cache.
///
/// Reads populate `user_<id>` on a miss, updates overwrite it and deletes
/// evict it. Nothing is cached for ids the store does not know.
pub struct UserServiceImpl {
    repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    settings: CacheSettings,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    /// Applies the failure policy to the result of a cache call.
    fn tolerate<T>(
        &self,
        operation: &str,
        key: &str,
        result: RosterResult<T>,
        fallback: T,
    ) -> RosterResult<T> {
        match result {
            Err(e)
                if e.is_cache_failure()
                    && self.settings.failure_policy == CacheFailurePolicy::FailOpen =>
            {
                warn!(
                    "Cache {} for key '{}' failed, continuing without cache: {}",
                    operation, key, e
                );
                Ok(fallback)
            }
            other => other,
        }
    }

    async fn read_envelope(&self, key: &str) -> RosterResult<Option<CacheEnvelope>> {
        let result = match self.cache.get::<CacheEnvelope>(key).await {
            // Anything other than a backend failure means the stored bytes did not decode
            Err(e) if !e.is_cache_failure() => {
                warn!("Ignoring undecodable cache entry '{}': {}", key, e);
                Ok(None)
            }
            other => other,
        };
        self.tolerate("get", key, result, None)
    }

    async fn write_envelope(&self, key: &str, value: &CacheEnvelope) -> RosterResult<()> {
        let result = self.cache.set(key, value, self.settings.ttl).await;
        self.tolerate("set", key, result, ())
    }

    async fn evict(&self, key: &str) -> RosterResult<bool> {
        let result = self.cache.delete(key).await;
        self.tolerate("delete", key, result, false)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_user(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Getting user: {}", id);
        let key = cache_keys::user_by_id(id);

        if let Some(envelope) = self.read_envelope(&key).await? {
            let kind = envelope.kind();
            match envelope.into_user_for(id) {
                Some(user) => {
                    debug!("User {} served from cache", id);
                    return Ok(Some(user));
                }
                None => warn!(
                    "Cache entry '{}' ({}) does not hold user {}, reloading",
                    key, kind, id
                ),
            }
        }

        let Some(user) = self.repository.find_by_id(id).await? else {
            debug!("User {} not found", id);
            return Ok(None);
        };

        self.write_envelope(&key, &CacheEnvelope::User(user.clone()))
            .await?;
        Ok(Some(user))
    }

    async fn create_user(&self, input: UserInput) -> RosterResult<User> {
        debug!("Creating user: {}", input.name);

        let user = self.repository.save(&input).await?;

        info!("User created: {}", user.id);
        Ok(user)
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> RosterResult<Option<User>> {
        debug!("Updating user: {}", id);

        let Some(mut user) = self.repository.find_by_id(id).await? else {
            debug!("User {} not found, nothing to update", id);
            return Ok(None);
        };

        user.apply(input);
        let updated = self.repository.update(&user).await?;

        let key = cache_keys::user_by_id(id);
        self.write_envelope(&key, &CacheEnvelope::User(updated.clone()))
            .await?;

        info!("User updated: {}", id);
        Ok(Some(updated))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        if !self.repository.delete_by_id(id).await? {
            debug!("User {} was not in the store", id);
        }

        let key = cache_keys::user_by_id(id);
        self.evict(&key).await?;

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn list_users_page(&self, query: UserListQuery) -> RosterResult<Page<UserView>> {
        let page = PageRequest::from_one_based(query.page, query.size);
        debug!(
            "Listing users, filter: {:?}, page: {}, size: {}",
            query.name_filter(),
            page.page,
            page.size
        );
        // Out-of-range paging is rejected before the store is queried
        page.offset()?;

        let users = match query.name_filter() {
            Some(fragment) => {
                self.repository
                    .find_by_name_containing_ignore_case(fragment, page)
                    .await?
            }
            None => self.repository.find_all(page).await?,
        };

        Ok(users.map(UserView::from))
    }

    async fn cache_set(&self, key: &str, value: CacheEnvelope) -> RosterResult<()> {
        self.write_envelope(key, &value).await
    }

    async fn cache_get(&self, key: &str) -> RosterResult<Option<CacheEnvelope>> {
        self.read_envelope(key).await
    }

    async fn cache_delete(&self, key: &str) -> RosterResult<bool> {
        self.evict(key).await
    }
}
