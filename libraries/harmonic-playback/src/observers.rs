//! Observer registry
//!
//! Token → callback map. Dispatch clones the live entries out of the lock
//! before calling them, so a callback may unsubscribe itself (or anyone
//! else) mid-dispatch. Each entry carries an `active` flag that is checked
//! right before its call, so an observer removed during a dispatch is not
//! called later in that same dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Callback<T> = dyn Fn(&T) + Send + Sync;

struct Entry<T> {
    active: Arc<AtomicBool>,
    callback: Box<Callback<T>>,
}

struct Inner<T> {
    next_id: u64,
    entries: BTreeMap<u64, Arc<Entry<T>>>,
}

/// Registry of observers receiving `&T`
pub(crate) struct Registry<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T: 'static> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
        }
    }

    /// Register a callback
    pub(crate) fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.insert(
                id,
                Arc::new(Entry {
                    active: active.clone(),
                    callback: Box::new(callback),
                }),
            );
            id
        };

        let registry: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        let flag = active.clone();
        let remove: Box<dyn FnOnce() + Send> = Box::new(move || {
            flag.store(false, Ordering::Release);
            if let Some(inner) = registry.upgrade() {
                lock(&inner).entries.remove(&id);
            }
        });

        Subscription {
            id,
            active,
            remove: Mutex::new(Some(remove)),
        }
    }

    /// Call every live observer with `value`
    pub(crate) fn emit(&self, value: &T) {
        let entries: Vec<Arc<Entry<T>>> = lock(&self.inner).entries.values().cloned().collect();

        for entry in entries {
            if entry.active.load(Ordering::Acquire) {
                (entry.callback)(value);
            }
        }
    }

    /// Number of registered observers
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by `subscribe`
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    remove: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    /// Deregister the observer. Calling this more than once is harmless.
    pub fn unsubscribe(&self) {
        let remove = lock(&self.remove).take();
        if let Some(remove) = remove {
            remove();
        }
    }

    /// Whether the observer is still registered
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
