//! App lifecycle handler implementations.

use std::sync::Arc;

use cinefind_flux::StateStore;

use super::{search_handlers, trend_handlers, DiscoverContext};
use crate::state::*;

/// Handle `app/initialize`: reset state, then fetch popular movies and the
/// trending list side by side.
pub async fn handle_initialize(store: &StateStore, ctx: &Arc<DiscoverContext>) {
    store.set(SearchInput::PATH, SearchInput::default());
    store.set(SearchState::PATH, SearchState::idle());
    store.set(TrendingState::PATH, TrendingState::default());

    tokio::join!(
        search_handlers::run_search("", store, ctx),
        trend_handlers::load_trending(store, ctx),
    );
}
