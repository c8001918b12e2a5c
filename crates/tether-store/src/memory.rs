use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{KeyValueStore, StoreError};

/// In-memory store. Clones share the same map, so a clone handed to a
/// binding can be inspected by whoever kept the original.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses writes once keys plus values would exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota = Some(bytes);
        store
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().entries.contains_key(key)
    }

    /// Bytes currently used, counted as key length plus value length.
    pub fn used_bytes(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(limit) = inner.quota {
            let others: usize = inner
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_owned(),
                    limit: Some(limit),
                });
            }
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().entries.remove(key);
        Ok(())
    }
}
