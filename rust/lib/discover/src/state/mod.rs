//! State definitions.
//!
//! Each file defines one state type stored at a well-known path.

pub mod input;
pub mod search;
pub mod trending;

pub use input::SearchInput;
pub use search::{SearchPhase, SearchState, SearchView};
pub use trending::{TrendingEntry, TrendingState};
