pub mod auth;
pub mod health;
pub mod records;
pub mod users;

use axum::routing::get;
use axum::Router;
use quizbank_core::exam::ExamFields;
use quizbank_core::question::QuestionFields;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth                            current user (auth)
/// /auth/login                      login (public)
///
/// /users                           list (auth), create (admin)
/// /users/{id}                      get (auth), update, delete (admin)
/// /users/{id}/reset-password       reset password (admin)
///
/// /questions                       list (public), create (editor)
/// /questions/{id}                  get (public), update (editor), delete (admin)
///
/// /tests                           list (public), create (editor)
/// /tests/{id}                      get (public), update (editor), delete (admin)
/// /test-results                    results of all tests (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/questions", records::router::<QuestionFields>())
        .nest("/tests", records::router::<ExamFields>())
        .route("/test-results", get(handlers::exams::list_results))
}
