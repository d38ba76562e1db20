//! Request definitions. Each request type is emitted at its `PATH`.

pub mod app;
pub mod search;
pub mod trending;

pub use app::InitializeReq;
pub use search::{SearchQueryReq, SearchTypeReq};
pub use trending::TrendingLoadReq;
