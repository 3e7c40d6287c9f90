//! User accounts.
//!
//! Users are the actors every record mutation is attributed to. Records hold
//! user ids as plain references; removing a user does not touch them.

use serde::{Deserialize, Serialize};

use crate::types::{DocId, Timestamp};

/// Stored user document.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: DocId,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: DocId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl User {
    /// Apply the non-`None` parts of `input`.
    pub fn apply(&mut self, input: UpdateUser) {
        if let Some(username) = input.username {
            self.username = username;
        }
        if let Some(first_name) = input.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = input.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(email) = input.email {
            self.email = Some(email);
        }
        if let Some(role) = input.role {
            self.role = role;
        }
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = chrono::Utc::now();
        User {
            id: uuid::Uuid::now_v7(),
            username: "ada".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            email: None,
            password_hash: "$argon2id$secret".into(),
            role: "editor".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn response_omits_password_hash() {
        let json = serde_json::to_value(UserResponse::from(&user())).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "ada");
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut u = user();
        u.apply(UpdateUser {
            role: Some("admin".into()),
            ..Default::default()
        });
        assert_eq!(u.role, "admin");
        assert_eq!(u.username, "ada");
        assert_eq!(u.first_name.as_deref(), Some("Ada"));
    }
}
