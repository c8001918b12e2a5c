//! Unmount guards.
//!
//! `remember_persistent` detaches its binding through one of these: the
//! guard is registered on the scope of the composition that created the
//! binding, and disposing that scope runs it.

use std::cell::Cell;
use std::rc::Rc;

/// Cleanup that runs at most once, however many clones call [`run`](Self::run).
#[derive(Clone)]
pub struct Dispose(Rc<Guard>);

struct Guard {
    cleanup: Cell<Option<Box<dyn FnOnce()>>>,
    spent: Cell<bool>,
}

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(Guard {
            cleanup: Cell::new(Some(Box::new(f))),
            spent: Cell::new(false),
        }))
    }

    pub fn run(&self) {
        if self.0.spent.replace(true) {
            return;
        }
        if let Some(f) = self.0.cleanup.take() {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.spent.get()
    }
}

/// Run `f` now. The returned guard is also attached to the current scope,
/// so it runs on unmount if nobody runs it first.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let guard = f();

    if let Some(scope) = crate::scope::current_scope() {
        let on_dispose = guard.clone();
        scope.add_disposer(move || on_dispose.run());
    } else {
        log::debug!("effect outside of a scope; its cleanup runs only when called");
    }

    guard
}

pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}
