/// Initial value for a key that has nothing usable in the store.
///
/// A `Supplier` runs at most once, and only when the store has no entry.
pub enum Fallback<T> {
    Literal(T),
    Supplier(Box<dyn FnOnce() -> T>),
}

impl<T> Fallback<T> {
    pub fn literal(value: T) -> Self {
        Fallback::Literal(value)
    }

    pub fn supplier(f: impl FnOnce() -> T + 'static) -> Self {
        Fallback::Supplier(Box::new(f))
    }

    pub fn resolve(self) -> T {
        match self {
            Fallback::Literal(value) => value,
            Fallback::Supplier(f) => f(),
        }
    }
}

impl<T> From<T> for Fallback<T> {
    fn from(value: T) -> Self {
        Fallback::Literal(value)
    }
}
