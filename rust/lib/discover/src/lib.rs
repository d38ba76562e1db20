//! Movie discovery app logic.
//!
//! All state lives in a [`Flux`](cinefind_flux::Flux) store; the terminal
//! front end only emits requests and renders snapshots.
//!
//! - `state/`: state types, each at a `PATH` (`movies/search`, …)
//! - `request/`: request types, each at a `PATH` (`search/type`, …)
//! - `handlers/`: handler implementations + [`register_handlers`]
//!
//! Search flow: `search/type` → [`DebounceGate`] → fetch cycle guarded by
//! [`RequestSequencer`] → `movies/search`; a successful non-empty search
//! then bumps the term's trend counter in the background.

pub mod config;
pub mod debounce;
pub mod error;
pub mod handlers;
pub mod request;
pub mod sequence;
pub mod state;

pub use config::{ConfigError, DiscoverConfig};
pub use debounce::{DebounceGate, DEBOUNCE_DELAY};
pub use error::{DiscoverError, FETCH_FAILED};
pub use handlers::{register_handlers, DiscoverContext};
pub use sequence::RequestSequencer;
