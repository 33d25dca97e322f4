//! User management controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use roster_core::{RosterError, UserId};
use roster_service::{UserListQuery, UserRequest, UserView};
use tracing::debug;

/// Total number of users matching a list query, before paging.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users, optionally filtered by a name fragment.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "One page of users, newest first", body = [UserView],
            headers(("x-total-count" = u64, description = "Matching users across all pages")))
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<(HeaderMap, Json<ApiResponse<Vec<UserView>>>), AppError> {
    debug!(name = ?query.name, page = ?query.page, size = ?query.size, "List users request");

    let page = state.user_service.list_users_page(query).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_elements()),
    );

    Ok((headers, Json(ApiResponse::success(page.content))))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserView>>), AppError> {
    debug!("Create user request: {}", request.name);

    let user = state.user_service.create_user(request.into()).await?;
    Ok(created(UserView::from(user)))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 404, description = "No user with this ID")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserView> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .get_user(user_id)
        .await?
        .ok_or_else(|| RosterError::not_found("User", user_id))?;

    ok(user.into())
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 404, description = "No user with this ID"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> ApiResult<UserView> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state
        .user_service
        .update_user(user_id, request.into())
        .await?
        .ok_or_else(|| RosterError::not_found("User", user_id))?;

    ok(user.into())
}

/// Delete a user. Deleting an unknown ID also succeeds.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.user_service.delete_user(user_id).await?;
    Ok(no_content())
}

fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(RosterError::validation(format!("Invalid user ID: {}", id))))
}
