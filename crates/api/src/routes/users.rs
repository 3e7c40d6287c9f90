use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                        -> list_users (auth)
/// POST   /                        -> create_user (admin)
/// GET    /{id}                    -> get_user (auth)
/// PUT    /{id}                    -> update_user (admin)
/// DELETE /{id}                    -> delete_user (admin)
/// POST   /{id}/reset-password     -> reset_password (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/reset-password", post(users::reset_password))
}
