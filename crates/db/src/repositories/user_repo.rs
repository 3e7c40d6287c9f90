//! Repository for the `users` collection.

use quizbank_core::error::CoreError;
use quizbank_core::types::{new_doc_id, DocId};
use quizbank_core::user::{CreateUser, UpdateUser, User};
use serde_json::Value;

use crate::error::DbError;
use crate::store::{DocumentStore, Filter, WriteOutcome};

const COLLECTION: &str = "users";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Usernames are unique; the store checks and inserts
    /// atomically, so concurrent creates of one name yield one account.
    pub async fn create(store: &dyn DocumentStore, input: &CreateUser) -> Result<User, DbError> {
        let now = chrono::Utc::now();
        let user = User {
            id: new_doc_id(),
            username: input.username.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: now,
            updated_at: now,
        };
        let outcome = store
            .insert_unique(COLLECTION, user.id, encode(&user)?, &username_key(&user.username))
            .await?;
        if outcome == WriteOutcome::Duplicate {
            return Err(username_taken(&user.username));
        }
        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn find_by_id(store: &dyn DocumentStore, id: DocId) -> Result<Option<User>, DbError> {
        store
            .find_by_id(COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        store: &dyn DocumentStore,
        username: &str,
    ) -> Result<Option<User>, DbError> {
        store
            .find_all(COLLECTION, &Filter::eq("username", username))
            .await?
            .into_iter()
            .next()
            .map(decode)
            .transpose()
    }

    /// List all users in creation order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<User>, DbError> {
        store
            .find_all(COLLECTION, &Filter::all())
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no user with the given `id` exists.
    pub async fn update(
        store: &dyn DocumentStore,
        id: DocId,
        input: UpdateUser,
    ) -> Result<Option<User>, DbError> {
        let Some(mut user) = Self::find_by_id(store, id).await? else {
            return Ok(None);
        };

        user.apply(input);
        let outcome = store
            .replace_unique(COLLECTION, id, encode(&user)?, &username_key(&user.username))
            .await?;
        match outcome {
            WriteOutcome::Written => Ok(Some(user)),
            WriteOutcome::Missing => Ok(None),
            WriteOutcome::Duplicate => Err(username_taken(&user.username)),
        }
    }

    /// Replace a user's password hash. Returns `true` if the user exists.
    pub async fn update_password(
        store: &dyn DocumentStore,
        id: DocId,
        password_hash: &str,
    ) -> Result<bool, DbError> {
        let Some(mut user) = Self::find_by_id(store, id).await? else {
            return Ok(false);
        };
        user.password_hash = password_hash.to_string();
        user.updated_at = chrono::Utc::now();
        store.replace(COLLECTION, id, encode(&user)?).await
    }

    /// Hard-delete a user. Records referencing the user are left as they are.
    ///
    /// Returns `true` if the user existed.
    pub async fn delete(store: &dyn DocumentStore, id: DocId) -> Result<bool, DbError> {
        store.delete(COLLECTION, id).await
    }
}

fn username_key(username: &str) -> Filter {
    Filter::eq("username", username)
}

fn username_taken(username: &str) -> DbError {
    CoreError::Conflict(format!("Username '{username}' is already taken")).into()
}

fn encode(user: &User) -> Result<Value, DbError> {
    serde_json::to_value(user).map_err(|e| DbError::malformed(COLLECTION, e))
}

fn decode(doc: Value) -> Result<User, DbError> {
    serde_json::from_value(doc).map_err(|e| DbError::malformed(COLLECTION, e))
}
