use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Observable value. Clones are handles to the same cell.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<(SubId, Rc<dyn Fn(&T)>)>,
    next_sub: SubId,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
            next_sub: 0,
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        self.set_quiet(v);
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Replace the value without running subscribers. Pair with [`notify`](Self::notify).
    pub fn set_quiet(&self, v: T) {
        self.0.borrow_mut().value = v;
    }

    /// Run every subscriber with the current value.
    ///
    /// Subscribers run after the cell's borrow is released, so they may read
    /// or write this signal.
    pub fn notify(&self)
    where
        T: Clone,
    {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: Vec<_> = inner.subs.iter().map(|(_, s)| s.clone()).collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        let sub: Rc<dyn Fn(&T)> = Rc::new(f);
        inner.subs.push((id, sub));
        id
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut inner = self.0.borrow_mut();
        let before = inner.subs.len();
        inner.subs.retain(|(sid, _)| *sid != id);
        inner.subs.len() != before
    }

    pub fn clear_subscribers(&self) {
        self.0.borrow_mut().subs.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
