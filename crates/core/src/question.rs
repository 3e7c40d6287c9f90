//! Question records.
//!
//! A question has a title and a typed body. Free-text questions carry a
//! plain string; choice questions carry a list of [`Choice`]s. The body shape
//! is decided by [`QuestionKind`] and checked on validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::record::{RecordFields, VersionedRecord};
use crate::validation::{not_blank, rule_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-text answer.
    Simple,
    /// Any number of choices may be correct.
    MultipleChoice,
    /// At most one choice may be correct.
    SingleChoice,
}

impl QuestionKind {
    pub fn uses_choices(self) -> bool {
        !matches!(self, QuestionKind::Simple)
    }
}

/// One selectable answer of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable identifier within the question; generated when omitted.
    #[serde(default = "new_choice_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

fn new_choice_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Simple(String),
    Choices(Vec<Choice>),
}

/// Question kind and its matching body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionType {
    pub kind: QuestionKind,
    pub content: Content,
}

impl QuestionType {
    pub fn simple(text: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::Simple,
            content: Content::Simple(text.into()),
        }
    }

    pub fn choices(kind: QuestionKind, choices: Vec<Choice>) -> Self {
        Self {
            kind,
            content: Content::Choices(choices),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuestionFields {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_question_type"))]
    pub question_type: QuestionType,
}

impl RecordFields for QuestionFields {
    const ENTITY: &'static str = "Question";
    const COLLECTION: &'static str = "questions";
}

pub type Question = VersionedRecord<QuestionFields>;

fn validate_question_type(question_type: &QuestionType) -> Result<(), ValidationError> {
    match (&question_type.kind, &question_type.content) {
        (QuestionKind::Simple, Content::Simple(_)) => Ok(()),
        (QuestionKind::Simple, Content::Choices(_)) => Err(rule_error(
            "content_mismatch",
            "simple questions take text content",
        )),
        (_, Content::Simple(_)) => Err(rule_error(
            "content_mismatch",
            "choice questions take a list of choices",
        )),
        (kind, Content::Choices(choices)) => validate_choices(*kind, choices),
    }
}

fn validate_choices(kind: QuestionKind, choices: &[Choice]) -> Result<(), ValidationError> {
    if choices.is_empty() {
        return Err(rule_error("no_choices", "at least one choice is required"));
    }

    let mut seen = HashSet::new();
    for (index, choice) in choices.iter().enumerate() {
        if not_blank(&choice.text).is_err() {
            return Err(rule_error(
                "blank_choice",
                format!("choice {} has no text", index + 1),
            ));
        }
        if !seen.insert(choice.id.as_str()) {
            return Err(rule_error(
                "duplicate_choice",
                format!("choice id '{}' is used more than once", choice.id),
            ));
        }
    }

    let correct = choices.iter().filter(|c| c.is_correct).count();
    if kind == QuestionKind::SingleChoice && correct > 1 {
        return Err(rule_error(
            "too_many_correct",
            "single choice questions allow at most one correct choice",
        ));
    }
    Ok(())
}
