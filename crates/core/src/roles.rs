//! Well-known role name constants.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_CANDIDATE: &str = "candidate";

/// All role names accepted when creating or updating a user.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_CANDIDATE];

pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

/// Whether `role` may create and update questions and tests.
pub fn can_write_records(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
