//! Startup provisioning.

use quizbank_core::roles::ROLE_ADMIN;
use quizbank_core::user::CreateUser;
use quizbank_db::repositories::UserRepo;
use quizbank_db::store::DocumentStore;

use crate::auth::password::{check_password_length, hash_password};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Make sure the configured admin account exists.
///
/// An existing account with that username is left alone, whatever its role
/// or password. Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(
    store: &dyn DocumentStore,
    admin: &BootstrapAdmin,
) -> AppResult<bool> {
    if UserRepo::find_by_username(store, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(false);
    }

    check_password_length(&admin.password).map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        store,
        &CreateUser {
            username: admin.username.clone(),
            first_name: None,
            last_name: None,
            email: None,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
