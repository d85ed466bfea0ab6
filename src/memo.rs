//! Single-entry memoization keyed on the identities of a selector's inputs.
//!
//! A [`Memo`] remembers the last key it was asked for together with the value computed
//! from it. Asking again with an unchanged key hands back the same `Arc`, which in turn
//! keeps every memo downstream of it on the cached path.

use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// How a memo decides that an input did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    /// Same allocation only.
    Identity,
    /// Same allocation, or structurally equal contents.
    Deep,
}

impl Default for Equality {
    fn default() -> Self {
        Equality::Identity
    }
}

pub trait Dependency: Clone {
    fn unchanged(&self, previous: &Self, equality: Equality) -> bool;
}

impl<T: PartialEq> Dependency for Arc<T> {
    fn unchanged(&self, previous: &Self, equality: Equality) -> bool {
        Arc::ptr_eq(self, previous) || (equality == Equality::Deep && **self == **previous)
    }
}

impl Dependency for String {
    fn unchanged(&self, previous: &Self, _: Equality) -> bool {
        self == previous
    }
}

impl Dependency for bool {
    fn unchanged(&self, previous: &Self, _: Equality) -> bool {
        self == previous
    }
}

impl<D: Dependency> Dependency for Option<D> {
    fn unchanged(&self, previous: &Self, equality: Equality) -> bool {
        match (self, previous) {
            (Some(current), Some(previous)) => current.unchanged(previous, equality),
            (None, None) => true,
            _ => false,
        }
    }
}

macro_rules! tuple_dependency {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Dependency),+> Dependency for ($($name,)+) {
            fn unchanged(&self, previous: &Self, equality: Equality) -> bool {
                $(self.$idx.unchanged(&previous.$idx, equality))&&+
            }
        }
    };
}

tuple_dependency!(A: 0);
tuple_dependency!(A: 0, B: 1);
tuple_dependency!(A: 0, B: 1, C: 2);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
tuple_dependency!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);

#[derive(Debug)]
pub struct Memo<K, V> {
    name: &'static str,
    equality: Equality,
    last: RefCell<Option<(K, Arc<V>)>>,
    computations: Cell<usize>,
}

impl<K: Dependency, V> Memo<K, V> {
    pub fn new(name: &'static str, equality: Equality) -> Self {
        Self {
            name,
            equality,
            last: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn equality(&self) -> Equality {
        self.equality
    }

    /// Number of times the value was actually computed.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }

    pub fn invalidate(&self) {
        self.last.replace(None);
    }

    pub fn get<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.cached(&key) {
            return value;
        }
        let value = Arc::new(compute(&key));
        self.store(key, &value);
        value
    }

    /// Like [`Memo::get`], but a failed computation leaves the previous entry in place.
    pub fn try_get<F, E>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.cached(&key) {
            return Ok(value);
        }
        let value = Arc::new(compute(&key)?);
        self.store(key, &value);
        Ok(value)
    }

    fn cached(&self, key: &K) -> Option<Arc<V>> {
        let last = self.last.borrow();
        let hit = match last.as_ref() {
            Some((previous, value)) if key.unchanged(previous, self.equality) => Some(Arc::clone(value)),
            _ => None,
        };
        if hit.is_some() {
            trace!("{} cache hit", self.name);
        }
        hit
    }

    fn store(&self, key: K, value: &Arc<V>) {
        let count = self.computations.get() + 1;
        self.computations.set(count);
        debug!("{} recomputed ({} so far)", self.name, count);
        self.last.replace(Some((key, Arc::clone(value))));
    }
}
