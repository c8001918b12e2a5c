use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (disabled, missing, torn down).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the store's capacity. `limit` is the byte budget
    /// when the store knows it.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String, limit: Option<usize> },

    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be parsed as a key/value map.
    #[error("store document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
