//! # Store locals
//!
//! Hooks never reach for a global store. The store a composed subtree should
//! use is provided like any other composition local:
//!
//! ```rust
//! use std::rc::Rc;
//! use tether_core::*;
//!
//! let store = Rc::new(MemoryStore::new());
//! with_store(store.clone(), || {
//!     // every `remember_persistent` in here binds against `store`
//! });
//! ```
//!
//! Outside of any `with_store` frame, `current_store()` yields an in-memory
//! store private to the current thread.

use std::cell::RefCell;
use std::rc::Rc;

use tether_store::{KeyValueStore, MemoryStore};

thread_local! {
    static STORE_STACK: RefCell<Vec<Rc<dyn KeyValueStore>>> = RefCell::new(Vec::new());
    static DEFAULT_STORE: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new()) as Rc<dyn KeyValueStore>;
}

pub fn with_store<R>(store: Rc<dyn KeyValueStore>, f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            STORE_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    STORE_STACK.with(|st| st.borrow_mut().push(store));
    let _guard = Guard;
    f()
}

pub fn current_store() -> Rc<dyn KeyValueStore> {
    STORE_STACK
        .with(|st| st.borrow().last().cloned())
        .unwrap_or_else(|| DEFAULT_STORE.with(Rc::clone))
}
