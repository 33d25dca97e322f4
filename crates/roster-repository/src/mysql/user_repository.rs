//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use roster_core::{Page, PageRequest, RosterError, RosterResult, User, UserId, UserInput};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(UserId::new(row.id), row.name, row.email)
    }
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_i64(value: usize) -> RosterResult<i64> {
    i64::try_from(value).map_err(|_| RosterError::validation("Page bounds out of range"))
}

/// `LIMIT` and `OFFSET` values for `page`, checked before any query runs.
fn bounds(page: &PageRequest) -> RosterResult<(i64, i64)> {
    Ok((to_i64(page.limit())?, to_i64(page.offset()?)?))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self, page: PageRequest) -> RosterResult<Page<User>> {
        debug!("Finding all users, page: {}, size: {}", page.page, page.size);
        let (limit, offset) = bounds(&page)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        let sql = format!(
            "SELECT id, name, email FROM users ORDER BY {} LIMIT ? OFFSET ?",
            page.sort.to_sql()
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.inner())
            .await?;

        let users = rows.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total.unsigned_abs()))
    }

    async fn find_by_name_containing_ignore_case(
        &self,
        fragment: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>> {
        debug!(
            "Finding users by name fragment: {}, page: {}, size: {}",
            fragment, page.page, page.size
        );
        let (limit, offset) = bounds(&page)?;

        let pattern = escape_like(fragment);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE LOWER(name) LIKE CONCAT('%', LOWER(?), '%')",
        )
        .bind(&pattern)
        .fetch_one(self.pool.inner())
        .await?;

        let sql = format!(
            r#"
            SELECT id, name, email
            FROM users
            WHERE LOWER(name) LIKE CONCAT('%', LOWER(?), '%')
            ORDER BY {}
            LIMIT ? OFFSET ?
            "#,
            page.sort.to_sql()
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.inner())
            .await?;

        let users = rows.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total.unsigned_abs()))
    }

    async fn save(&self, input: &UserInput) -> RosterResult<User> {
        debug!("Saving new user: {}", input.name);

        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(&input.name)
            .bind(&input.email)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| RosterError::internal("Inserted id does not fit in i64"))?;

        Ok(input.clone().into_user(UserId::new(id)))
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        debug!("Updating user: {}", user.id);

        sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        // MySQL reports zero affected rows for a no-op update, so re-read instead
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", user.id))
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count.unsigned_abs())
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
