//! Flux: path-addressed state engine.
//!
//! Rust owns every piece of application state and all the logic that
//! changes it; the presentation side only renders snapshots and emits
//! requests.
//!
//! # Three Primitives
//!
//! - `emit(path, payload)`: send a request, Trie-routed to handler(s)
//! - `get(path)`: read the current immutable snapshot at a path
//! - `subscribe(pattern)`: observe snapshot changes
//!
//! # Paths
//!
//! Requests and state share one `/`-separated namespace, e.g. requests at
//! `search/type`, `search/query`, state at `movies/search`,
//! `movies/trending`. Patterns accept MQTT-style wildcards: `movies/+`
//! matches one level, `movies/#` any depth, `#` everything.
//!
//! # Transitions
//!
//! Handlers never mutate a snapshot in place. They publish a new value with
//! `StateStore::set`, or decide against the current one atomically with
//! `StateStore::update` (used for stale-response suppression).

pub mod app;
pub mod router;
pub mod store;
pub mod trie;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
