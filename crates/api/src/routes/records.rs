use axum::routing::get;
use axum::Router;
use quizbank_core::record::RecordFields;

use crate::handlers::records;
use crate::state::AppState;

/// CRUD routes for one record kind, mounted at `/questions` and `/tests`.
///
/// ```text
/// GET    /?status=   -> list (public)
/// POST   /           -> create (admin, editor)
/// GET    /{id}       -> get (public)
/// PUT    /{id}       -> update (admin, editor)
/// DELETE /{id}       -> delete (admin)
/// ```
pub fn router<F: RecordFields>() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list::<F>).post(records::create::<F>))
        .route(
            "/{id}",
            get(records::get::<F>)
                .put(records::update::<F>)
                .delete(records::delete::<F>),
        )
}
