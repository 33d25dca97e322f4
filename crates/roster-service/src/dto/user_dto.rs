//! User-related DTOs.

use roster_core::{User, UserId, UserInput};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,
}

impl From<UserRequest> for UserInput {
    fn from(request: UserRequest) -> Self {
        UserInput::new(request.name, request.email)
    }
}

/// Query parameters of the list operation.
///
/// `page` is 1-based; missing or non-positive values select the first page.
/// `size` falls back to 10 when missing or non-positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Case-insensitive name fragment; empty means no filter.
    pub name: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub size: Option<i64>,
}

impl UserListQuery {
    /// Returns the name filter if it is non-empty.
    #[must_use]
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
