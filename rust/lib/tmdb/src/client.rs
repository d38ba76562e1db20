use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::SourceError;
use crate::model::{Envelope, MoviePage};
use crate::query::MovieQuery;
use crate::traits::MovieSource;

/// Default TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// HTTP client for the TMDB v3 API, authenticated with a v4 read access
/// token sent as `Authorization: Bearer …`.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, api_token)
    }

    /// Reuse a preconfigured `reqwest::Client` (timeouts, proxy).
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, query: &MovieQuery) -> String {
        format!("{}{}", self.base_url, query.path())
    }

    /// Map an HTTP response to a page, surfacing API-reported failures.
    async fn parse(resp: reqwest::Response) -> Result<MoviePage, SourceError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: code,
                message: body,
            });
        }

        let body = resp.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| SourceError::Decode(format!("response body: {e}")))?;

        if envelope.success == Some(false) {
            return Err(SourceError::Api {
                code: envelope.status_code.unwrap_or_default(),
                message: envelope.status_message.unwrap_or_default(),
            });
        }

        Ok(MoviePage {
            page: envelope.page,
            results: envelope.results.unwrap_or_default(),
            total_pages: envelope.total_pages,
            total_results: envelope.total_results,
        })
    }
}

#[async_trait::async_trait]
impl MovieSource for TmdbClient {
    async fn fetch(&self, query: &MovieQuery) -> Result<MoviePage, SourceError> {
        let url = self.url(query);
        debug!("GET {url} {:?}", query.params());
        let resp = self
            .http
            .get(&url)
            .query(&query.params())
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await?;
        Self::parse(resp).await
    }
}
