//! # Signals, remembered state, and persistence
//!
//! Tether is a small reactive core whose main job is keeping a piece of UI
//! state bound to a key in a durable store. The pieces:
//!
//! - `Signal<T>` — observable value with subscribers.
//! - `remember*` — storage bound to a composition slot, reused across passes.
//! - `effect` / `scoped_effect` — side-effects with cleanup on unmount.
//! - `PersistentState<T>` — a value mirrored to a `KeyValueStore` on every change.
//! - `remember_persistent` — the hook form: `(value, setter)` for a key.
//!
//! ## Signals
//!
//! ```rust
//! use tether_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Persistent state in a composition
//!
//! A `Composition` is a mounted tree; each `compose` call is one render pass.
//! `remember_persistent` binds on the first pass and returns the same binding
//! afterwards. The store comes from the nearest `with_store` frame.
//!
//! ```rust
//! use std::rc::Rc;
//! use tether_core::*;
//!
//! let store = Rc::new(MemoryStore::new());
//! let mut ui = Composition::new();
//!
//! let render = || {
//!     with_store(store.clone(), || remember_persistent("name", String::new()))
//! };
//!
//! let (name, set_name) = ui.compose(render);
//! assert_eq!(name, "");
//! set_name.set("Ada".to_string());
//!
//! let (name, _) = ui.compose(render);
//! assert_eq!(name, "Ada");
//! assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Ada\""));
//!
//! ui.dispose(); // unmount: the binding detaches, the entry stays
//! assert!(store.contains_key("name"));
//! ```
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! let scope = Scope::new();
//! scope.run(|| {
//!     scoped_effect(|| -> Box<dyn FnOnce()> {
//!         log::info!("mounted");
//!         Box::new(|| log::info!("unmounted"))
//!     });
//! });
//! scope.dispose();
//! ```
//!
//! - `effect` runs once and returns a `Dispose` guard that also runs when the
//!   current scope is torn down.
//! - `scoped_effect` registers its returned cleanup on the current `Scope`.

pub mod effects;
pub mod error;
pub mod fallback;
pub mod hooks;
pub mod locals;
pub mod persist;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;

pub use effects::*;
pub use error::*;
pub use fallback::*;
pub use hooks::*;
pub use locals::*;
pub use persist::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
