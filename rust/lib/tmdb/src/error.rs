use thiserror::Error;

/// Failure talking to the movie source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Non-success HTTP status. `message` is the raw response body.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure: DNS, connect, TLS, timeout, truncated body.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not the JSON shape we expect.
    #[error("decode: {0}")]
    Decode(String),

    /// Success status, but the payload reports `"success": false`.
    #[error("api error {code}: {message}")]
    Api { code: u32, message: String },
}

impl SourceError {
    /// Whether the source itself reported the failure (as opposed to the
    /// request never producing a usable response).
    pub fn is_api_reported(&self) -> bool {
        matches!(self, SourceError::Api { .. })
    }
}
