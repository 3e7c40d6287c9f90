//! Shared query parameter types for API handlers.

use quizbank_core::record::RecordStatus;
use serde::Deserialize;

/// Query parameters for record list endpoints (`?status=active|archived`).
///
/// Without `status` every record is returned. Pagination is left to clients.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<RecordStatus>,
}
