//! Test records (named `Exam` in code to stay clear of the test harness).
//!
//! A test lists the questions it is made of by reference and keeps the
//! results candidates submitted. References are plain identifiers: deleting
//! a question leaves any test that lists it untouched.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::record::{RecordFields, VersionedRecord};
use crate::types::{DocId, Timestamp};
use crate::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRef {
    pub question_id: DocId,
}

/// One candidate's submission for a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub candidate_id: DocId,
    pub id: String,
    pub answer_date: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExamFields {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub desc: Option<String>,
    /// Scheduled date of the test; defaults to the time of the request.
    #[serde(default = "chrono::Utc::now")]
    pub date: Timestamp,
    #[serde(default)]
    pub questions: Vec<QuestionRef>,
    #[serde(default)]
    pub results: Vec<ExamResult>,
}

impl ExamFields {
    pub fn references(&self, question_id: DocId) -> bool {
        self.questions.iter().any(|q| q.question_id == question_id)
    }
}

impl RecordFields for ExamFields {
    const ENTITY: &'static str = "Test";
    const COLLECTION: &'static str = "tests";
}

pub type Exam = VersionedRecord<ExamFields>;
