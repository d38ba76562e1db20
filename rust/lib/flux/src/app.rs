use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// The state engine: one store, one router.
///
/// - `emit(path, payload)` routes a request to its handler(s) and waits.
/// - `get` / `get_as` read state snapshots.
/// - `subscribe(pattern)` observes state changes.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("search/query", |_, payload, store| async move {
///     let Some(req) = payload.downcast_ref::<SearchQueryReq>() else { return };
///     store.set("movies/search", SearchState::loading(&req.query, 1));
/// });
/// flux.subscribe("movies/#", |path, _| println!("{path} changed"));
/// flux.emit("search/query", SearchQueryReq { query: "heat".into() }).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    /// Returns the number of handlers that ran.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) -> usize {
        self.emit_arc(path, Arc::new(payload)).await
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) -> usize {
        self.router.dispatch(path, payload, Arc::clone(&self.store)).await
    }

    /// Register an async handler for a request pattern (`+` / `#` allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.store.unsubscribe(pattern, id)
    }

    /// The underlying store, for handlers wired outside `on` and for tests.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
