use async_trait::async_trait;
use quizbank_core::types::DocId;
use serde_json::Value;

use quizbank_core::error::CoreError;

use super::{DocumentStore, Filter, WriteOutcome};
use crate::error::DbError;
use crate::DbPool;

/// PostgreSQL backend: one JSONB row per document in the `documents` table.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, id: DocId, doc: Value) -> Result<(), DbError> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id)
            .bind(&doc)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(collection, e))?;
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, DbError> {
        let body = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(body)
    }

    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, DbError> {
        let bodies = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents
             WHERE collection = $1 AND body @> $2
             ORDER BY seq",
        )
        .bind(collection)
        .bind(filter.to_json())
        .fetch_all(&self.pool)
        .await?;
        Ok(bodies)
    }

    async fn replace(&self, collection: &str, id: DocId, doc: Value) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE documents SET body = $3, updated_at = NOW()
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(collection, e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError> {
        let result = sqlx::query(
            "INSERT INTO documents (collection, id, body)
             SELECT $1, $2, $3
             WHERE NOT EXISTS (
                 SELECT 1 FROM documents WHERE collection = $1 AND body @> $4
             )",
        )
        .bind(collection)
        .bind(id)
        .bind(&doc)
        .bind(unique.to_json())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(WriteOutcome::Written),
            Ok(_) => Ok(WriteOutcome::Duplicate),
            Err(e) if is_unique_violation(&e) => Ok(WriteOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError> {
        let result = sqlx::query(
            "UPDATE documents SET body = $3, updated_at = NOW()
             WHERE collection = $1 AND id = $2
               AND NOT EXISTS (
                   SELECT 1 FROM documents
                   WHERE collection = $1 AND id <> $2 AND body @> $4
               )",
        )
        .bind(collection)
        .bind(id)
        .bind(&doc)
        .bind(unique.to_json())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(WriteOutcome::Written),
            Ok(_) => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS (SELECT 1 FROM documents WHERE collection = $1 AND id = $2)",
                )
                .bind(collection)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
                Ok(if exists {
                    WriteOutcome::Duplicate
                } else {
                    WriteOutcome::Missing
                })
            }
            Err(e) if is_unique_violation(&e) => Ok(WriteOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, collection: &str, id: DocId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

/// PostgreSQL unique violation (SQLSTATE 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn write_error(collection: &str, err: sqlx::Error) -> DbError {
    if is_unique_violation(&err) {
        return CoreError::Conflict(format!(
            "Duplicate value violates a unique constraint in '{collection}'"
        ))
        .into();
    }
    err.into()
}
