use crate::{KeyValueStore, StoreError};

/// Wraps a store so every key is written as `"{namespace}:{key}"`.
pub struct Namespaced<S> {
    inner: S,
    prefix: String,
}

impl<S: KeyValueStore> Namespaced<S> {
    pub fn new(inner: S, namespace: &str) -> Self {
        Self {
            inner,
            prefix: format!("{namespace}:"),
        }
    }

    pub fn namespace(&self) -> &str {
        self.prefix.trim_end_matches(':')
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl<S: KeyValueStore> KeyValueStore for Namespaced<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(&self.scoped(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(&self.scoped(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(&self.scoped(key))
    }
}
