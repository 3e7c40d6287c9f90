use quizbank_core::error::CoreError;

/// Errors surfaced by stores and repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error (not found, validation, conflict, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The backing database could not serve the request. Never retried.
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A stored document does not match the expected shape.
    #[error("Malformed document in '{collection}': {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DbError {
    pub(crate) fn malformed(collection: &str, source: serde_json::Error) -> Self {
        DbError::Malformed {
            collection: collection.to_string(),
            source,
        }
    }
}
