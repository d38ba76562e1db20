//! Trend handler implementations.

use cinefind_flux::StateStore;
use cinefind_trend::TrendSeed;
use tracing::{debug, warn};

use super::DiscoverContext;
use crate::error::DiscoverError;
use crate::state::*;

/// Count one search for `term` without holding up the caller. Failures are
/// logged and dropped.
pub fn record_in_background(ctx: &DiscoverContext, term: String, seed: TrendSeed) {
    let trends = ctx.trends.clone();
    ctx.background.spawn(async move {
        match trends.record_search(&term, &seed).await {
            Ok(record) => debug!("trend {term:?} count {}", record.count),
            Err(e) => warn!("{}", DiscoverError::from(e)),
        }
    });
}

/// Handle `trending/load`: publish the top entries. On failure the
/// current list is left as it is.
pub async fn load_trending(store: &StateStore, ctx: &DiscoverContext) {
    match ctx.trends.top(ctx.trending_limit).await {
        Ok(records) => {
            debug!("loaded {} trending entries", records.len());
            store.set(
                TrendingState::PATH,
                TrendingState {
                    entries: records.into_iter().map(TrendingEntry::from).collect(),
                },
            );
        }
        Err(e) => warn!("trending load failed: {}", DiscoverError::from(e)),
    }
}
