//! Append-only activity log attached to every versioned record.
//!
//! Entries are kept in insertion order (oldest first). There is no API to
//! remove or edit an entry once appended; the log only disappears together
//! with the record that owns it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DocId, Timestamp};

/// What happened to a record.
///
/// `Delete` and `Recovery` are accepted when reading stored documents but no
/// record operation produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Creation,
    Update,
    Delete,
    Recovery,
}

/// A single attributed event in a record's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// The user who performed the action (plain reference, not owned).
    pub actor: DocId,
    pub kind: ActivityKind,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry attributed to `actor`.
    ///
    /// `timestamp` defaults to now. Fails only when `actor` is the nil id,
    /// which never refers to a real user.
    pub fn append(
        &mut self,
        actor: DocId,
        kind: ActivityKind,
        timestamp: Option<Timestamp>,
    ) -> Result<&ActivityEntry, CoreError> {
        if actor.is_nil() {
            return Err(CoreError::InvalidActor(actor));
        }
        self.entries.push(ActivityEntry {
            actor,
            kind,
            timestamp: timestamp.unwrap_or_else(chrono::Utc::now),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Entries newest first, for display.
    pub fn iter_recent(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }

    pub fn first(&self) -> Option<&ActivityEntry> {
        self.entries.first()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn append_keeps_insertion_order() {
        let mut log = ActivityLog::new();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        log.append(a, ActivityKind::Creation, None).unwrap();
        log.append(b, ActivityKind::Update, None).unwrap();
        log.append(a, ActivityKind::Update, None).unwrap();

        let actors: Vec<_> = log.entries().iter().map(|e| e.actor).collect();
        assert_eq!(actors, vec![a, b, a]);
        assert_eq!(log.first().unwrap().kind, ActivityKind::Creation);
        assert_eq!(log.latest().unwrap().actor, a);
    }

    #[test]
    fn explicit_timestamp_is_kept() {
        let mut log = ActivityLog::new();
        let when = Utc::now() - Duration::days(3);
        let entry = log
            .append(Uuid::now_v7(), ActivityKind::Creation, Some(when))
            .unwrap();
        assert_eq!(entry.timestamp, when);
    }

    #[test]
    fn nil_actor_is_rejected() {
        let mut log = ActivityLog::new();
        let result = log.append(Uuid::nil(), ActivityKind::Creation, None);
        assert_matches!(result, Err(CoreError::InvalidActor(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn iter_recent_reverses_without_touching_the_log() {
        let mut log = ActivityLog::new();
        log.append(Uuid::now_v7(), ActivityKind::Creation, None).unwrap();
        log.append(Uuid::now_v7(), ActivityKind::Update, None).unwrap();

        let kinds: Vec<_> = log.iter_recent().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ActivityKind::Update, ActivityKind::Creation]);
        assert_eq!(log.entries()[0].kind, ActivityKind::Creation);
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut log = ActivityLog::new();
        log.append(Uuid::now_v7(), ActivityKind::Creation, None).unwrap();

        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["kind"], "creation");

        let back: ActivityLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn stored_recovery_entries_deserialize() {
        let json = serde_json::json!([{
            "actor": Uuid::now_v7(),
            "kind": "recovery",
            "timestamp": Utc::now(),
        }]);
        let log: ActivityLog = serde_json::from_value(json).unwrap();
        assert_eq!(log.entries()[0].kind, ActivityKind::Recovery);
    }
}
