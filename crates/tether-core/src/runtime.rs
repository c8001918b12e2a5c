use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::scope::Scope;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// A mounted UI tree: the slots it remembers plus the scope its effects
/// clean up into. Each `compose` call is one render pass.
///
/// Every composition owns its slots. They are swapped into `COMPOSER` only
/// for the length of a pass, so several trees can stay mounted on one thread.
pub struct Composition {
    composer: Composer,
    scope: Scope,
    passes: usize,
}

impl Composition {
    pub fn new() -> Self {
        Self {
            composer: Composer::default(),
            scope: Scope::new(),
            passes: 0,
        }
    }

    pub fn compose<R>(&mut self, f: impl FnOnce() -> R) -> R {
        // Hands the slots back to this composition even if `f` unwinds.
        struct Mounted<'a>(&'a mut Composer);
        impl Drop for Mounted<'_> {
            fn drop(&mut self) {
                COMPOSER.with(|c| std::mem::swap(self.0, &mut *c.borrow_mut()));
            }
        }

        self.composer.cursor = 0;
        COMPOSER.with(|c| std::mem::swap(&mut self.composer, &mut *c.borrow_mut()));
        let _mounted = Mounted(&mut self.composer);

        self.passes += 1;
        log::trace!("compose pass {}", self.passes);
        self.scope.run(f)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Unmount: run every registered cleanup and forget remembered slots.
    pub fn dispose(self) {
        self.scope.dispose();
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot-based remember (sequential composition only)
///
/// `init` runs without the composer borrowed, so it may itself remember.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let (cursor, cached) = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            // reserve the position before `init` can claim later ones
            c.slots.push(Box::new(()));
            return (cursor, None);
        }

        match c.slots[cursor].downcast_ref::<Rc<T>>() {
            Some(rc) => (cursor, Some(rc.clone())),
            None => {
                log::warn!(
                    "remember: slot {} type changed; replacing. \
                     If this is due to conditional composition, prefer remember_with_key.",
                    cursor
                );
                (cursor, None)
            }
        }
    });

    if let Some(rc) = cached {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        if let Some(slot) = c.borrow_mut().slots.get_mut(cursor) {
            *slot = Box::new(rc.clone());
        }
    });
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let cached = COMPOSER.with(|c| {
        let c = c.borrow();
        let existing = c.keyed_slots.get(&key)?;
        let rc = existing.downcast_ref::<Rc<T>>().cloned();
        if rc.is_none() {
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }
        rc
    });

    if let Some(rc) = cached {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone()));
    });
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}
