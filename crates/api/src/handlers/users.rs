//! Handlers for the `/users` resource.
//!
//! Reads are open to any authenticated caller; writes require `admin`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quizbank_core::error::CoreError;
use quizbank_core::roles::{is_known_role, ALL_ROLES};
use quizbank_core::types::DocId;
use quizbank_core::user::{CreateUser, UpdateUser, UserResponse};
use quizbank_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{check_password_length, hash_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for `POST /users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(state.store()).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(state.store(), id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// POST /api/v1/users
///
/// Create an account. The password is hashed before it reaches the store.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim().to_string();
    if username.is_empty() {
        return Err(validation("Username is required"));
    }
    check_role(&input.role)?;
    check_password_length(&input.password).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        state.store(),
        &CreateUser {
            username,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, admin = %admin.user_id, "Admin created user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /api/v1/users/{id}
///
/// Update profile fields and role. Passwords go through `reset-password`.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(username) = input.username.take() {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(validation("Username must not be blank"));
        }
        input.username = Some(username);
    }
    if let Some(role) = &input.role {
        check_role(role)?;
    }

    let user = UserRepo::update(state.store(), id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/{id}
///
/// Hard delete. Records the user authored keep their references.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DocId>,
) -> AppResult<StatusCode> {
    if !UserRepo::delete(state.store(), id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = %id, admin = %admin.user_id, "Admin deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    check_password_length(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(state.store(), id, &password_hash).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = %id, admin = %admin.user_id, "Admin reset user password");
    Ok(StatusCode::NO_CONTENT)
}

fn check_role(role: &str) -> AppResult<()> {
    if !is_known_role(role) {
        return Err(validation(&format!(
            "Unknown role '{role}'. Expected one of: {}",
            ALL_ROLES.join(", ")
        )));
    }
    Ok(())
}

fn validation(message: &str) -> AppError {
    AppError::Core(CoreError::Validation(message.to_string()))
}
