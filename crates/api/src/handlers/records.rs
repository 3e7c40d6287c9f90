//! Generic handlers for versioned records.
//!
//! Questions and tests share one lifecycle, so each handler is written once
//! over [`RecordFields`] and mounted per kind, e.g.
//! `get(records::list::<QuestionFields>)`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quizbank_core::record::{RecordFields, RecordUpdate, VersionedRecord};
use quizbank_core::types::DocId;
use quizbank_db::repositories::RecordRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::query::StatusFilterParams;
use crate::state::AppState;

/// GET /api/v1/{collection}?status=active|archived
pub async fn list<F: RecordFields>(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<Vec<VersionedRecord<F>>>> {
    let records = RecordRepo::list::<F>(state.store(), params.status).await?;
    Ok(Json(records))
}

/// GET /api/v1/{collection}/{id}
pub async fn get<F: RecordFields>(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<VersionedRecord<F>>> {
    let record = RecordRepo::get::<F>(state.store(), id).await?;
    Ok(Json(record))
}

/// POST /api/v1/{collection}
///
/// The body is the kind's fields; the caller becomes the author.
pub async fn create<F: RecordFields>(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    AppJson(fields): AppJson<F>,
) -> AppResult<(StatusCode, Json<VersionedRecord<F>>)> {
    let record = RecordRepo::create(state.store(), fields, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/v1/{collection}/{id}
///
/// Body: `{ "fields"?: {...}, "status"?: "active" | "archived" }`.
pub async fn update<F: RecordFields>(
    State(state): State<AppState>,
    RequireEditor(user): RequireEditor,
    AppPath(id): AppPath<DocId>,
    AppJson(update): AppJson<RecordUpdate<F>>,
) -> AppResult<Json<VersionedRecord<F>>> {
    let record = RecordRepo::update(state.store(), id, update, user.user_id).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/{collection}/{id}
pub async fn delete<F: RecordFields>(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DocId>,
) -> AppResult<StatusCode> {
    RecordRepo::delete::<F>(state.store(), id, admin.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
