//! Search handler implementations.

use std::sync::Arc;

use cinefind_flux::StateStore;
use cinefind_tmdb::MovieQuery;
use cinefind_trend::TrendSeed;
use tracing::{debug, warn};

use super::trend_handlers;
use super::DiscoverContext;
use crate::error::DiscoverError;
use crate::request::*;
use crate::state::*;

/// Handle `search/type`: mirror the text into `search/input` and hand the
/// fetch to the debounce gate.
pub fn handle_type(req: &SearchTypeReq, store: &Arc<StateStore>, ctx: &Arc<DiscoverContext>) {
    store.set(SearchInput::PATH, SearchInput(req.text.clone()));

    let text = req.text.clone();
    let store = Arc::clone(store);
    let task_ctx = Arc::clone(ctx);
    ctx.gate.schedule(req.text.trim(), move || async move {
        debug!("debounced search for: {text}");
        run_search(&text, &store, &task_ctx).await;
    });
}

/// Handle `search/query`: fetch immediately. A pending debounced search for
/// the same text is dropped as redundant; one for different text is newer
/// input and keeps its timer.
pub async fn handle_query(
    req: &SearchQueryReq,
    store: &Arc<StateStore>,
    ctx: &Arc<DiscoverContext>,
) {
    if ctx.gate.cancel_key(req.query.trim()) {
        debug!("search/query {:?} replaces pending debounced search", req.query);
    }
    run_search(&req.query, store, ctx).await;
}

/// One fetch cycle: Loading, then Success or Failure.
///
/// The cycle's ticket guards both transitions. Loading is published only
/// over an older snapshot; the result only over this cycle's own Loading
/// snapshot. Returns whether the result was published.
pub async fn run_search(raw: &str, store: &StateStore, ctx: &Arc<DiscoverContext>) -> bool {
    let query = MovieQuery::from_input(raw);
    let term = query.term().unwrap_or_default().to_string();
    let seq = ctx.sequencer.next();

    let started = store.update::<SearchState, _>(SearchState::PATH, |current| match current {
        Some(newer) if newer.seq > seq => None,
        _ => Some(SearchState::loading(&term, seq)),
    });
    if !started {
        debug!("search #{seq} for {term:?} superseded before start");
        return false;
    }

    let (next, top) = match ctx.movies.fetch(&query).await {
        Ok(page) => {
            debug!("search #{seq} for {term:?}: {} results", page.results.len());
            let top = page.results.first().cloned();
            (SearchState::succeeded(&term, page.results, seq), top)
        }
        Err(e) => {
            let err = DiscoverError::from(e);
            warn!("search #{seq} for {term:?} failed: {err}");
            (SearchState::failed(&term, err.user_message(), seq), None)
        }
    };

    let applied = store.update::<SearchState, _>(SearchState::PATH, move |current| match current {
        Some(own) if own.seq == seq => Some(next),
        _ => None,
    });
    if !applied {
        debug!("dropping stale response #{seq} for {term:?}");
        return false;
    }

    if let (MovieQuery::Search(_), Some(movie)) = (&query, top) {
        let seed = TrendSeed {
            movie_id: movie.id,
            poster_url: movie.poster_url(&ctx.image_base_url).unwrap_or_default(),
            title: movie.title,
        };
        trend_handlers::record_in_background(ctx, term, seed);
    }
    true
}
