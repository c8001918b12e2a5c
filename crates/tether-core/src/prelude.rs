pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::error::{ErrorKind, PersistError};
pub use crate::fallback::Fallback;
pub use crate::hooks::remember_persistent;
pub use crate::locals::{current_store, with_store};
pub use crate::persist::{Next, PersistentState, Setter, load, save};
pub use crate::runtime::{
    Composition, remember, remember_state, remember_state_with_key, remember_with_key,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, SubId, signal};
pub use tether_store::{FileStore, KeyValueStore, MemoryStore, Namespaced, StoreConfig, StoreError};
