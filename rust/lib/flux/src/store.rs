use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::trie::Trie;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-addressed snapshot store with Trie-routed change notifications.
///
/// - `set(path, value)` publishes a new snapshot and notifies subscribers.
/// - `update(path, transition)` publishes conditionally, deciding from the
///   current snapshot while holding the write lock.
/// - `get(path)` / `get_as::<T>(path)` read the latest snapshot.
/// - `subscribe(pattern, handler)` observes changes under a pattern.
///
/// Subscribers run synchronously on the writer's thread, after the write lock
/// has been released, so they may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    handlers: Trie<HandlerEntry>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct HandlerEntry {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            handlers: Trie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Publish `value` at `path` unconditionally.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            values.insert(path.to_string(), value.clone());
        }
        self.notify(path, &value);
    }

    /// Run a state transition against the current snapshot at `path`.
    ///
    /// `transition` sees the current value (or `None` when the path is unset
    /// or holds another type) and returns the next snapshot, or `None` to
    /// leave the state untouched. The read and the write happen under one
    /// write lock, so concurrent transitions on the same path are serialized.
    ///
    /// Returns `true` when a new snapshot was published.
    pub fn update<T, F>(&self, path: &str, transition: F) -> bool
    where
        T: Any + Send + Sync,
        F: FnOnce(Option<&T>) -> Option<T>,
    {
        let published = {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            let current = values.get(path).and_then(|v| v.downcast_ref::<T>());
            match transition(current) {
                Some(next) => {
                    let value = StateValue::new(next);
                    values.insert(path.to_string(), value.clone());
                    value
                }
                None => return false,
            }
        };
        self.notify(path, &published);
        true
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(path).cloned()
    }

    /// Typed read: the snapshot at `path` cloned out as `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    pub fn contains(&self, path: &str) -> bool {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(path, snapshot)` pairs, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(
            pattern,
            HandlerEntry {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.handlers.remove(pattern, |entry| entry.id == id)
    }

    fn notify(&self, path: &str, value: &StateValue) {
        for entry in self.handlers.match_topic(path) {
            (entry.handler)(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
