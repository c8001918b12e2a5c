use tether_store::StoreError;
use thiserror::Error;

/// Which side of a binding failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stored entry could not be read back into a value.
    Deserialization,
    /// The value could not be written to the store.
    Persistence,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not read `{key}` from store: {source}")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("stored value for `{key}` is not valid: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for `{key}` cannot be serialized: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write `{key}` to store: {source}")]
    Write {
        key: String,
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PersistError::Read { .. } | PersistError::Decode { .. } => ErrorKind::Deserialization,
            PersistError::Encode { .. } | PersistError::Write { .. } => ErrorKind::Persistence,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            PersistError::Read { key, .. }
            | PersistError::Decode { key, .. }
            | PersistError::Encode { key, .. }
            | PersistError::Write { key, .. } => key,
        }
    }
}
