use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Fallback, PersistentState, Setter, current_store, effect, on_unmount, remember};

/// Persistent counterpart of `remember_state`.
///
/// The first pass binds `key` against [`current_store`]; later passes return
/// the same binding, re-keying it if a different `key` is passed. When the
/// enclosing scope is disposed the binding detaches; its store entry stays.
///
/// Slot-based like [`remember`], so two call sites using the same key hold
/// independent values.
pub fn remember_persistent<T>(
    key: impl Into<String>,
    fallback: impl Into<Fallback<T>>,
) -> (T, Setter<T>)
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    let key = key.into();
    let state = remember(|| {
        let state = PersistentState::bind(current_store(), key.clone(), fallback);
        let detach = state.clone();
        effect(move || on_unmount(move || detach.dispose()));
        state
    });

    state.rekey(key);
    (state.get(), state.setter())
}
