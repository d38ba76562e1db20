//! Search-term popularity tracking.
//!
//! Every successful search for a non-empty term bumps that term's counter;
//! the most-counted terms become the trending list. [`TrendStore`] is the
//! seam, with two implementations:
//!
//! - [`AppwriteStore`]: an Appwrite Databases collection over REST.
//! - [`MemoryTrendStore`]: process-local, for running without a backend.

pub mod appwrite;
pub mod error;
pub mod memory;
pub mod model;
pub mod traits;

pub use appwrite::{AppwriteSettings, AppwriteStore};
pub use error::TrendError;
pub use memory::MemoryTrendStore;
pub use model::{TrendRecord, TrendSeed};
pub use traits::TrendStore;
