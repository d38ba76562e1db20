//! Movie metadata source.
//!
//! [`MovieSource`] is the seam the app talks to; [`TmdbClient`] implements it
//! over the TMDB v3 REST API:
//!
//! - search: `GET {base}/search/movie?query=…`
//! - discover: `GET {base}/discover/movie?sort_by=popularity.desc`
//!
//! ```ignore
//! use cinefind_tmdb::{MovieQuery, MovieSource, TmdbClient};
//!
//! let client = TmdbClient::new(cinefind_tmdb::DEFAULT_BASE_URL, token);
//! let page = client.fetch(&MovieQuery::from_input("heat")).await?;
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod query;
pub mod traits;

pub use client::{TmdbClient, DEFAULT_BASE_URL};
pub use error::SourceError;
pub use model::{Movie, MoviePage, DEFAULT_IMAGE_BASE_URL};
pub use query::MovieQuery;
pub use traits::MovieSource;
