//! Runtime configuration.
//!
//! Resolved once at startup from an optional TOML file overlaid with the
//! process environment. Environment values win over file values.
//!
//! ```toml
//! [tmdb]
//! api_key = "eyJhbGciOi..."
//! base_url = "https://api.themoviedb.org/3"
//! image_base_url = "https://image.tmdb.org/t/p/w500"
//!
//! [appwrite]
//! endpoint = "https://cloud.appwrite.io/v1"
//! project_id = "cinefind"
//! database_id = "main"
//! collection_id = "metrics"
//!
//! [trending]
//! limit = 5
//! ```

use std::path::{Path, PathBuf};

use cinefind_tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use cinefind_trend::AppwriteSettings;
use serde::Deserialize;
use thiserror::Error;

use crate::error::DiscoverError;

/// Number of trending entries shown.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingSecret(&'static str),

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("trend store is partially configured, missing: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),
}

// ── File layout ─────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    tmdb: TmdbSection,
    #[serde(default)]
    appwrite: AppwriteSection,
    #[serde(default)]
    trending: TrendingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TmdbSection {
    api_key: Option<String>,
    base_url: Option<String>,
    image_base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AppwriteSection {
    endpoint: Option<String>,
    project_id: Option<String>,
    api_key: Option<String>,
    database_id: Option<String>,
    collection_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrendingSection {
    limit: Option<usize>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ── Resolved config ─────────────────────────────────────────────────

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverConfig {
    /// TMDB v4 read access token, sent as a bearer token.
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub image_base_url: String,
    /// `None` runs with the in-process trend store.
    pub appwrite: Option<AppwriteSettings>,
    pub trending_limit: usize,
}

impl DiscoverConfig {
    /// Startup entry point: resolve from `file` (if given) and the process
    /// environment.
    pub fn load(file: Option<&Path>) -> Result<Self, DiscoverError> {
        Ok(Self::resolve(file, |key| std::env::var(key).ok())?)
    }

    /// Resolve from `file` (if given) and an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn resolve<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let tmdb_api_key = var("TMDB_API_KEY")
            .or(file.tmdb.api_key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingSecret("TMDB_API_KEY"))?;

        let tmdb_base_url = var("TMDB_BASE_URL")
            .or(file.tmdb.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        check_url("TMDB_BASE_URL", &tmdb_base_url)?;

        let image_base_url = var("TMDB_IMAGE_BASE_URL")
            .or(file.tmdb.image_base_url)
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());
        check_url("TMDB_IMAGE_BASE_URL", &image_base_url)?;

        let trending_limit = match var("CINEFIND_TRENDING_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "CINEFIND_TRENDING_LIMIT",
                reason: format!("{raw:?}: {e}"),
            })?,
            None => file.trending.limit.unwrap_or(DEFAULT_TRENDING_LIMIT),
        };
        if trending_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "CINEFIND_TRENDING_LIMIT",
                reason: "must be at least 1".into(),
            });
        }

        let section = file.appwrite;
        let appwrite = appwrite_settings(
            var("APPWRITE_ENDPOINT").or(section.endpoint),
            var("APPWRITE_PROJECT_ID").or(section.project_id),
            var("APPWRITE_API_KEY").or(section.api_key),
            var("APPWRITE_DATABASE_ID").or(section.database_id),
            var("APPWRITE_COLLECTION_ID").or(section.collection_id),
        )?;

        Ok(Self {
            tmdb_api_key,
            tmdb_base_url,
            image_base_url,
            appwrite,
            trending_limit,
        })
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            reason: format!("{value:?} is not an http(s) URL"),
        })
    }
}

/// The trend store group is all-or-nothing: with none of its values set the
/// store is "not configured"; any one of them requires the project,
/// database and collection.
fn appwrite_settings(
    endpoint: Option<String>,
    project_id: Option<String>,
    api_key: Option<String>,
    database_id: Option<String>,
    collection_id: Option<String>,
) -> Result<Option<AppwriteSettings>, ConfigError> {
    let any_set = endpoint.is_some()
        || project_id.is_some()
        || api_key.is_some()
        || database_id.is_some()
        || collection_id.is_some();
    if !any_set {
        return Ok(None);
    }

    let mut missing = Vec::new();
    if project_id.is_none() {
        missing.push("APPWRITE_PROJECT_ID");
    }
    if database_id.is_none() {
        missing.push("APPWRITE_DATABASE_ID");
    }
    if collection_id.is_none() {
        missing.push("APPWRITE_COLLECTION_ID");
    }
    match (project_id, database_id, collection_id) {
        (Some(project_id), Some(database_id), Some(collection_id)) => {
            let endpoint = endpoint.unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string());
            check_url("APPWRITE_ENDPOINT", &endpoint)?;
            Ok(Some(AppwriteSettings {
                endpoint,
                project_id,
                api_key,
                database_id,
                collection_id,
            }))
        }
        _ => Err(ConfigError::Incomplete(missing)),
    }
}
