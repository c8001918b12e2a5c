//! # Persistent state
//!
//! A [`PersistentState<T>`] binds a key to a value that lives in memory for
//! synchronous reads and is written through to a [`KeyValueStore`] on every
//! change, so it survives restarts.
//!
//! ```rust
//! use std::rc::Rc;
//! use tether_core::*;
//!
//! let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
//!
//! let count = PersistentState::bind(store.clone(), "count", 0i32);
//! count.update(|n| n + 1);
//! count.update(|n| n + 1);
//!
//! // a later binding (e.g. after a restart) picks the value back up
//! let again = PersistentState::<i32>::bind(store, "count", 0);
//! assert_eq!(again.get(), 2);
//! ```
//!
//! Store failures never reach the caller: a bad or unreadable entry falls
//! back to the initial value, and a failed write keeps the new in-memory
//! value. Both are logged. Use [`load`] and [`save`] directly when the error
//! matters.
//!
//! Two bindings to the same key do not see each other's updates; the last
//! write wins in the store.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tether_store::KeyValueStore;

use crate::signal::{Signal, SubId};
use crate::{Fallback, PersistError};

/// Read and decode the entry for `key`.
///
/// `Ok(None)` when there is no entry or the entry is JSON `null`.
pub fn load<T, S>(store: &S, key: &str) -> Result<Option<T>, PersistError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key).map_err(|source| PersistError::Read {
        key: key.to_owned(),
        source,
    })?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    // `Option<T>` maps a stored `null` to `None`
    serde_json::from_str::<Option<T>>(&raw).map_err(|source| PersistError::Decode {
        key: key.to_owned(),
        source,
    })
}

/// Encode `value` and write it under `key`.
pub fn save<T, S>(store: &S, key: &str, value: &T) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw).map_err(|source| PersistError::Write {
        key: key.to_owned(),
        source,
    })
}

/// A replacement value, or a function of the previous one.
pub enum Next<T> {
    Value(T),
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Next<T> {
    pub fn with(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Next::With(Box::new(f))
    }
}

impl<T> From<T> for Next<T> {
    fn from(value: T) -> Self {
        Next::Value(value)
    }
}

pub struct PersistentState<T: 'static> {
    inner: Rc<Binding<T>>,
}

struct Binding<T: 'static> {
    key: RefCell<String>,
    value: Signal<T>,
    store: Rc<dyn KeyValueStore>,
    attached: Cell<bool>,
}

impl<T> Clone for PersistentState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PersistentState<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Bind `key` in `store`.
    ///
    /// Uses the stored value when one decodes, otherwise resolves `fallback`.
    /// The resulting value is written through once, so the store holds it
    /// even if no update follows.
    pub fn bind(
        store: Rc<dyn KeyValueStore>,
        key: impl Into<String>,
        fallback: impl Into<Fallback<T>>,
    ) -> Self {
        let key = key.into();
        let restored = match load::<T, _>(store.as_ref(), &key) {
            Ok(Some(value)) => {
                log::debug!("persistent state `{key}` restored from store");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                log::error!("Error retrieving data from store: {e}");
                None
            }
        };
        let initial = restored.unwrap_or_else(|| fallback.into().resolve());

        let state = Self {
            inner: Rc::new(Binding {
                key: RefCell::new(key),
                value: Signal::new(initial),
                store,
                attached: Cell::new(true),
            }),
        };
        state.write_through();
        state
    }

    pub fn key(&self) -> String {
        self.inner.key.borrow().clone()
    }

    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.value.with(f)
    }

    pub fn set(&self, value: T) {
        self.commit(value);
    }

    /// `f` sees a snapshot of the current value, so it may itself read or
    /// update this binding.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let prev = self.get();
        let next = f(&prev);
        self.commit(next);
    }

    pub fn apply(&self, next: Next<T>) {
        match next {
            Next::Value(value) => self.set(value),
            Next::With(f) => self.update(f),
        }
    }

    /// Move the binding to `key` without reading the store. The current value
    /// is written under the new key; the old entry is left as it is.
    pub fn rekey(&self, key: impl Into<String>) {
        let key = key.into();
        if *self.inner.key.borrow() == key {
            return;
        }
        log::debug!(
            "persistent state rekeyed `{}` -> `{key}`",
            self.inner.key.borrow()
        );
        *self.inner.key.borrow_mut() = key;
        if self.is_attached() {
            self.write_through();
        }
    }

    /// `f` runs after every committed update, once the store write is done.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.inner.value.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.inner.value.unsubscribe(id)
    }

    pub fn setter(&self) -> Setter<T> {
        Setter {
            state: self.clone(),
        }
    }

    /// Detach from the owning UI. Later updates are ignored and subscribers
    /// are dropped; the store entry stays.
    pub fn dispose(&self) {
        if self.inner.attached.replace(false) {
            log::debug!("persistent state `{}` detached", self.inner.key.borrow());
            self.inner.value.clear_subscribers();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    fn commit(&self, next: T) {
        if !self.is_attached() {
            log::warn!(
                "update to detached persistent state `{}` ignored",
                self.inner.key.borrow()
            );
            return;
        }
        self.inner.value.set_quiet(next);
        self.write_through();
        self.inner.value.notify();
    }

    fn write_through(&self) {
        let key = self.key();
        let result = self
            .inner
            .value
            .with(|value| save(self.inner.store.as_ref(), &key, value));
        if let Err(e) = result {
            log::error!("Error saving data to store: {e}");
        }
    }
}

/// Cloneable update handle, the second half of `(value, setter)`.
pub struct Setter<T: 'static> {
    state: PersistentState<T>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> Setter<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    pub fn set(&self, value: T) {
        self.state.set(value)
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.state.update(f)
    }

    pub fn apply(&self, next: Next<T>) {
        self.state.apply(next)
    }

    pub fn state(&self) -> &PersistentState<T> {
        &self.state
    }
}
