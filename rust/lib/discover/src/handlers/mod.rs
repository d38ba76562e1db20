//! Handler implementations and Flux wiring.
//!
//! `register_handlers` binds every request path to its handler: the
//! payload is downcast to the request type and the handler gets the
//! store plus the shared [`DiscoverContext`].

pub mod app_handlers;
pub mod search_handlers;
pub mod trend_handlers;


use std::sync::Arc;

use cinefind_flux::{Flux, Payload, StateStore};
use cinefind_tmdb::{MovieSource, TmdbClient, DEFAULT_IMAGE_BASE_URL};
use cinefind_trend::{AppwriteStore, MemoryTrendStore, TrendStore};
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::config::{DiscoverConfig, DEFAULT_TRENDING_LIMIT};
use crate::debounce::DebounceGate;
use crate::request::*;
use crate::sequence::RequestSequencer;

/// Everything handlers share: the two remote stores plus the debounce
/// gate, the request sequencer and the background task set.
pub struct DiscoverContext {
    pub movies: Arc<dyn MovieSource>,
    pub trends: Arc<dyn TrendStore>,
    pub image_base_url: String,
    pub trending_limit: usize,
    pub gate: DebounceGate,
    pub sequencer: RequestSequencer,
    /// Work that must not delay display: debounced searches and trend
    /// updates. Front ends spawn their own search requests here too.
    pub background: TaskTracker,
}

impl DiscoverContext {
    pub fn new(movies: Arc<dyn MovieSource>, trends: Arc<dyn TrendStore>) -> Self {
        let background = TaskTracker::new();
        Self {
            movies,
            trends,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            trending_limit: DEFAULT_TRENDING_LIMIT,
            gate: DebounceGate::with_tracker(background.clone()),
            sequencer: RequestSequencer::new(),
            background,
        }
    }

    /// Build the live clients described by `config`.
    pub fn from_config(config: &DiscoverConfig) -> Self {
        let movies = Arc::new(TmdbClient::new(&config.tmdb_base_url, &config.tmdb_api_key));
        let trends: Arc<dyn TrendStore> = match &config.appwrite {
            Some(settings) => {
                info!(
                    "trend store: appwrite project {} collection {}",
                    settings.project_id, settings.collection_id
                );
                Arc::new(AppwriteStore::new(settings.clone()))
            }
            None => {
                warn!("trend store not configured, search counts are kept in memory");
                Arc::new(MemoryTrendStore::new())
            }
        };

        let mut ctx = Self::new(movies, trends);
        ctx.image_base_url = config.image_base_url.clone();
        ctx.trending_limit = config.trending_limit;
        ctx
    }

    /// Wait for background work to finish, including anything it spawns
    /// while being waited on (a debounced search's trend update).
    pub async fn settle(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }
}

fn payload<'a, T: 'static>(path: &str, payload: &'a Payload) -> Option<&'a T> {
    let req = payload.downcast_ref::<T>();
    if req.is_none() {
        warn!("{path}: unexpected payload type");
    }
    req
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<DiscoverContext>) {
    // app/initialize
    {
        let ctx = ctx.clone();
        flux.on(InitializeReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                app_handlers::handle_initialize(&store, &ctx).await;
            }
        });
    }

    // search/type
    {
        let ctx = ctx.clone();
        flux.on(SearchTypeReq::PATH, move |path, p, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                if let Some(req) = payload::<SearchTypeReq>(&path, &p) {
                    search_handlers::handle_type(req, &store, &ctx);
                }
            }
        });
    }

    // search/query
    {
        let ctx = ctx.clone();
        flux.on(SearchQueryReq::PATH, move |path, p, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                if let Some(req) = payload::<SearchQueryReq>(&path, &p) {
                    search_handlers::handle_query(req, &store, &ctx).await;
                }
            }
        });
    }

    // trending/load
    flux.on(TrendingLoadReq::PATH, move |_, _, store: Arc<StateStore>| {
        let ctx = ctx.clone();
        async move {
            trend_handlers::load_trending(&store, &ctx).await;
        }
    });
}
