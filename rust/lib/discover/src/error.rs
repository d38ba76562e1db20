use cinefind_tmdb::SourceError;
use cinefind_trend::TrendError;
use thiserror::Error;

use crate::config::ConfigError;

/// Message shown whenever a movie fetch fails without a more specific
/// reason from the source.
pub const FETCH_FAILED: &str = "Failed to fetch movies.";

#[derive(Error, Debug)]
pub enum DiscoverError {
    /// Transport failure, non-success status, or an unreadable body.
    #[error("movie fetch failed: {0}")]
    Network(SourceError),

    /// The source answered but reported a failure in the payload.
    #[error("movie source reported: {0}")]
    Api(String),

    /// Non-fatal: the search still displays.
    #[error("trend store: {0}")]
    TrendStore(#[from] TrendError),

    #[error("configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl From<SourceError> for DiscoverError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Api { message, .. } => DiscoverError::Api(message),
            other => DiscoverError::Network(other),
        }
    }
}

impl DiscoverError {
    /// Text for the error view. Only source-reported messages are shown
    /// verbatim.
    pub fn user_message(&self) -> String {
        match self {
            DiscoverError::Api(message) if !message.trim().is_empty() => message.clone(),
            _ => FETCH_FAILED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_map_to_taxonomy() {
        let status: DiscoverError = SourceError::Status {
            status: 500,
            message: "<html>".into(),
        }
        .into();
        assert!(matches!(status, DiscoverError::Network(_)));
        assert_eq!(status.user_message(), FETCH_FAILED);

        let decode: DiscoverError = SourceError::Decode("expected value".into()).into();
        assert!(matches!(decode, DiscoverError::Network(_)));
        assert_eq!(decode.user_message(), FETCH_FAILED);

        let api: DiscoverError = SourceError::Api {
            code: 34,
            message: "The resource you requested could not be found.".into(),
        }
        .into();
        assert_eq!(api.user_message(), "The resource you requested could not be found.");
    }

    #[test]
    fn blank_api_message_falls_back() {
        let api: DiscoverError = SourceError::Api {
            code: 0,
            message: String::new(),
        }
        .into();
        assert_eq!(api.user_message(), FETCH_FAILED);
    }

    #[test]
    fn trend_and_config_errors_use_generic_text() {
        let trend: DiscoverError = TrendError::Decode("document list".into()).into();
        assert_eq!(trend.to_string(), "trend store: decode: document list");

        let cfg: DiscoverError = ConfigError::MissingSecret("TMDB_API_KEY").into();
        assert_eq!(cfg.to_string(), "configuration: TMDB_API_KEY is not set");
        assert_eq!(cfg.user_message(), FETCH_FAILED);
    }
}
