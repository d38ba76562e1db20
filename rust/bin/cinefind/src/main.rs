//! `cinefind`: search movies from the terminal.
//!
//! Usage:
//!   cinefind [-c cinefind.toml] [--log-file cinefind.log]
//!   cinefind --query "blade runner"
//!
//! `TMDB_API_KEY` must be set (environment or config file). Without
//! Appwrite settings, search counts are kept in memory for the session.

mod render;
mod terminal;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use cinefind_discover::request::{InitializeReq, SearchQueryReq};
use cinefind_discover::state::{SearchInput, SearchState, TrendingState};
use cinefind_discover::{register_handlers, DiscoverConfig, DiscoverContext};
use cinefind_flux::Flux;
use clap::Parser;
use tracing::info;

/// Movie discovery in the terminal.
#[derive(Parser, Debug)]
#[command(name = "cinefind", about = "Search TMDB movies and see what's trending")]
struct Cli {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Log destination. The screen belongs to the UI.
    #[arg(long = "log-file", default_value = "cinefind.log")]
    log_file: PathBuf,

    /// Search once, print the screen, and exit.
    #[arg(short = 'q', long = "query")]
    query: Option<String>,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = DiscoverConfig::load(cli.config.as_deref())?;
    info!(
        "tmdb {} trending limit {}",
        config.tmdb_base_url, config.trending_limit
    );

    let ctx = Arc::new(DiscoverContext::from_config(&config));
    let flux = Arc::new(Flux::new());
    register_handlers(&flux, ctx.clone());

    match cli.query {
        Some(query) => search_once(&flux, &query).await,
        None => terminal::run(flux.clone(), ctx.clone()).await?,
    }

    // Let running searches and their trend updates land before exit.
    ctx.settle().await;
    info!("bye");
    Ok(())
}

async fn search_once(flux: &Flux, query: &str) {
    flux.emit(InitializeReq::PATH, InitializeReq).await;
    if !query.trim().is_empty() {
        flux.store().set(SearchInput::PATH, SearchInput(query.to_string()));
        flux.emit(
            SearchQueryReq::PATH,
            SearchQueryReq {
                query: query.to_string(),
            },
        )
        .await;
    }

    let search = flux
        .get_as::<SearchState>(SearchState::PATH)
        .unwrap_or_default();
    let trending = flux.get_as::<TrendingState>(TrendingState::PATH);
    for line in render::render_screen(query, &search, trending.as_ref()) {
        println!("{line}");
    }
}
