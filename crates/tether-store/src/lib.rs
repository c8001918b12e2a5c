//! # Stores
//!
//! A store is the durable half of a persistent binding: a flat map from string
//! keys to string values, in the shape of the browser's `localStorage`.
//! Values are opaque here; `tether-core` JSON-encodes them before writing.
//!
//! - [`MemoryStore`] — process-local map, optionally with a byte quota.
//! - [`FileStore`] — one JSON document on disk, rewritten atomically.
//! - [`Namespaced`] — prefixes every key, so several apps can share a store.
//! - `WebStorage` — `window.localStorage` (wasm32 only).
//!
//! ```rust
//! use tether_store::*;
//!
//! let store = MemoryStore::new();
//! store.set("count", "3").unwrap();
//! assert_eq!(store.get("count").unwrap().as_deref(), Some("3"));
//! ```
//!
//! Stores are accessed through `&self` from a single UI thread; they use
//! interior mutability and are not `Send`.

use std::rc::Rc;

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod namespaced;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::StoreConfig;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use namespaced::Namespaced;
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

/// String key/value capability injected into persistent bindings.
pub trait KeyValueStore {
    /// `Ok(None)` when no entry exists for `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
