//! Repository for versioned records (questions and tests).

use quizbank_core::error::CoreError;
use quizbank_core::record::{RecordFields, RecordStatus, RecordUpdate, VersionedRecord};
use quizbank_core::types::DocId;
use serde_json::Value;

use crate::error::DbError;
use crate::store::{DocumentStore, Filter};

/// Provides list/get/create/update/delete for any [`RecordFields`] kind.
///
/// Every mutation is attributed to an actor. Updates are read-modify-write
/// without version checks; the last replace to reach the store wins.
pub struct RecordRepo;

impl RecordRepo {
    /// List records of kind `F`, optionally restricted to one status.
    pub async fn list<F: RecordFields>(
        store: &dyn DocumentStore,
        status: Option<RecordStatus>,
    ) -> Result<Vec<VersionedRecord<F>>, DbError> {
        let filter = match status {
            Some(status) => Filter::eq("status", status.as_str()),
            None => Filter::all(),
        };
        store
            .find_all(F::COLLECTION, &filter)
            .await?
            .into_iter()
            .map(decode::<F>)
            .collect()
    }

    /// Fetch one record, failing with `NotFound` if it does not exist.
    pub async fn get<F: RecordFields>(
        store: &dyn DocumentStore,
        id: DocId,
    ) -> Result<VersionedRecord<F>, DbError> {
        let doc = store
            .find_by_id(F::COLLECTION, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: F::ENTITY,
                id,
            })?;
        decode(doc)
    }

    /// Validate and insert a new record created by `actor`.
    pub async fn create<F: RecordFields>(
        store: &dyn DocumentStore,
        fields: F,
        actor: DocId,
    ) -> Result<VersionedRecord<F>, DbError> {
        let record = VersionedRecord::create(fields, actor)?;
        store
            .insert(F::COLLECTION, record.id, encode(&record)?)
            .await?;
        tracing::info!(
            entity = F::ENTITY,
            id = %record.id,
            actor = %actor,
            "Record created"
        );
        Ok(record)
    }

    /// Apply `update` on behalf of `actor` and persist the whole record.
    ///
    /// On validation failure nothing is written.
    pub async fn update<F: RecordFields>(
        store: &dyn DocumentStore,
        id: DocId,
        update: RecordUpdate<F>,
        actor: DocId,
    ) -> Result<VersionedRecord<F>, DbError> {
        let mut record = Self::get::<F>(store, id).await?;
        record.apply_update(update, actor)?;

        let replaced = store
            .replace(F::COLLECTION, id, encode(&record)?)
            .await?;
        if !replaced {
            // Deleted between read and write.
            return Err(CoreError::NotFound {
                entity: F::ENTITY,
                id,
            }
            .into());
        }
        tracing::info!(
            entity = F::ENTITY,
            id = %id,
            actor = %actor,
            status = record.status.as_str(),
            revisions = record.activity.len(),
            "Record updated"
        );
        Ok(record)
    }

    /// Permanently remove a record together with its activity log.
    pub async fn delete<F: RecordFields>(
        store: &dyn DocumentStore,
        id: DocId,
        actor: DocId,
    ) -> Result<(), DbError> {
        if actor.is_nil() {
            return Err(CoreError::InvalidActor(actor).into());
        }
        if !store.delete(F::COLLECTION, id).await? {
            return Err(CoreError::NotFound {
                entity: F::ENTITY,
                id,
            }
            .into());
        }
        tracing::info!(entity = F::ENTITY, id = %id, actor = %actor, "Record deleted");
        Ok(())
    }
}

fn encode<F: RecordFields>(record: &VersionedRecord<F>) -> Result<Value, DbError> {
    serde_json::to_value(record).map_err(|e| DbError::malformed(F::COLLECTION, e))
}

fn decode<F: RecordFields>(doc: Value) -> Result<VersionedRecord<F>, DbError> {
    serde_json::from_value(doc).map_err(|e| DbError::malformed(F::COLLECTION, e))
}
