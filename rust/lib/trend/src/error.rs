use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("record not found: {0}")]
    NotFound(String),
}
