//! Versioned records: questions and tests share lifecycle status, author
//! attribution and an append-only activity log.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::activity::{ActivityKind, ActivityLog};
use crate::error::CoreError;
use crate::types::{new_doc_id, DocId, Timestamp};

/// Lifecycle flag of a record. Deletion is removal, not a status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Archived,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Archived => "archived",
        }
    }
}

/// Kind-specific attributes of a record.
///
/// Implemented by [`crate::question::QuestionFields`] and
/// [`crate::exam::ExamFields`].
pub trait RecordFields:
    Validate + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;
    /// Store collection holding records of this kind.
    const COLLECTION: &'static str;
}

/// A record of kind `F` with its status and history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionedRecord<F> {
    pub id: DocId,
    /// The user who created the record.
    pub author: DocId,
    #[serde(flatten)]
    pub fields: F,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub activity: ActivityLog,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A mutation request. Whatever is present replaces the stored value
/// wholesale; absent parts are left as they are.
///
/// Any key other than `fields` and `status` is rejected, so a flat body like
/// `{"title": ..., "status": ...}` fails instead of applying only the status.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "F: DeserializeOwned", deny_unknown_fields)]
pub struct RecordUpdate<F> {
    #[serde(default)]
    pub fields: Option<F>,
    #[serde(default)]
    pub status: Option<RecordStatus>,
}

impl<F> RecordUpdate<F> {
    pub fn fields(fields: F) -> Self {
        Self {
            fields: Some(fields),
            status: None,
        }
    }

    pub fn status(status: RecordStatus) -> Self {
        Self {
            fields: None,
            status: Some(status),
        }
    }
}

impl<F: RecordFields> VersionedRecord<F> {
    /// Validate `fields` and build a new active record whose log holds a
    /// single `creation` entry attributed to `actor`.
    pub fn create(fields: F, actor: DocId) -> Result<Self, CoreError> {
        fields.validate()?;

        let mut activity = ActivityLog::new();
        let now = chrono::Utc::now();
        activity.append(actor, ActivityKind::Creation, Some(now))?;

        Ok(Self {
            id: new_doc_id(),
            author: actor,
            fields,
            status: RecordStatus::Active,
            activity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `update` and append one `update` entry.
    ///
    /// All checks run before anything is written, so on error the record is
    /// exactly as it was.
    pub fn apply_update(&mut self, update: RecordUpdate<F>, actor: DocId) -> Result<(), CoreError> {
        if update.fields.is_none() && update.status.is_none() {
            return Err(CoreError::Validation(
                "Update must include fields or status".into(),
            ));
        }
        if let Some(fields) = &update.fields {
            fields.validate()?;
        }
        if actor.is_nil() {
            return Err(CoreError::InvalidActor(actor));
        }

        let now = chrono::Utc::now();
        self.activity
            .append(actor, ActivityKind::Update, Some(now))?;
        if let Some(fields) = update.fields {
            self.fields = fields;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = now;
        Ok(())
    }
}
