//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer token.
//! - [`rbac::RequireAdmin`] -- admin only.
//! - [`rbac::RequireEditor`] -- may create and update records.
//! - [`rbac::RequireAuth`] -- any authenticated caller.

pub mod auth;
pub mod rbac;
