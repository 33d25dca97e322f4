//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl User {
    /// Creates a user from its stored parts.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Overwrites the mutable fields with the given input.
    pub fn apply(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
    }

    /// Returns true if the name contains `fragment`, ignoring case.
    #[must_use]
    pub fn name_contains_ignore_case(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}

/// Mutable user fields, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

impl UserInput {
    /// Creates a new input payload.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attaches a store-assigned id, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_name_and_email() {
        let mut user = User::new(UserId::new(1), "Alice", "alice@example.com");
        user.apply(UserInput::new("Alicia", "alicia@example.com"));

        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alicia@example.com");
    }

    #[test]
    fn test_name_contains_ignore_case() {
        let user = User::new(UserId::new(1), "Natalia", "n@example.com");
        assert!(user.name_contains_ignore_case("ALI"));
        assert!(user.name_contains_ignore_case("tal"));
        assert!(!user.name_contains_ignore_case("bob"));
    }

    #[test]
    fn test_into_user_keeps_fields() {
        let user = UserInput::new("Bob", "bob@example.com").into_user(UserId::new(9));
        assert_eq!(user, User::new(UserId::new(9), "Bob", "bob@example.com"));
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::new(UserId::new(3), "Cara", "cara@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Cara");
        assert_eq!(json["email"], "cara@example.com");
    }
}
