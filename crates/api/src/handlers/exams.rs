//! Test-specific views.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use quizbank_core::exam::ExamFields;
use quizbank_core::types::{DocId, Timestamp};
use quizbank_core::user::User;
use quizbank_db::repositories::{RecordRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::rbac::RequireAuth;
use crate::query::StatusFilterParams;
use crate::state::AppState;

/// One submitted result, tagged with the test and the candidate it belongs to.
///
/// Candidate names are `None` when the account no longer exists.
#[derive(Debug, Serialize)]
pub struct TestResultEntry {
    pub test_id: DocId,
    pub test_title: String,
    pub candidate_id: DocId,
    pub candidate_first_name: Option<String>,
    pub candidate_last_name: Option<String>,
    pub result_id: String,
    pub answer_date: Timestamp,
}

/// GET /api/v1/test-results?status=
///
/// Results of every test, newest submission first.
pub async fn list_results(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<Vec<TestResultEntry>>> {
    let exams = RecordRepo::list::<ExamFields>(state.store(), params.status).await?;

    let mut candidates: HashMap<DocId, Option<User>> = HashMap::new();
    for exam in &exams {
        for result in &exam.fields.results {
            if !candidates.contains_key(&result.candidate_id) {
                let user = UserRepo::find_by_id(state.store(), result.candidate_id).await?;
                candidates.insert(result.candidate_id, user);
            }
        }
    }

    let mut entries = Vec::new();
    for exam in exams {
        for result in exam.fields.results {
            let candidate = candidates.get(&result.candidate_id).and_then(Option::as_ref);
            entries.push(TestResultEntry {
                test_id: exam.id,
                test_title: exam.fields.title.clone(),
                candidate_id: result.candidate_id,
                candidate_first_name: candidate.and_then(|u| u.first_name.clone()),
                candidate_last_name: candidate.and_then(|u| u.last_name.clone()),
                result_id: result.id,
                answer_date: result.answer_date,
            });
        }
    }
    entries.sort_by(|a, b| b.answer_date.cmp(&a.answer_date));

    Ok(Json(entries))
}
