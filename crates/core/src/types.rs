/// Identifier of every stored document (records and users).
///
/// Generated as UUIDv7 so identifiers sort by creation time.
pub type DocId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh document identifier.
pub fn new_doc_id() -> DocId {
    uuid::Uuid::now_v7()
}
