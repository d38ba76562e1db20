use serde::{Deserialize, Serialize};

/// One tracked search term, as stored in the document collection.
///
/// Field names follow the collection schema (`searchTerm`, `count`,
/// `movie_id`, `title`, `poster_url`); `$id` is the store-assigned key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    pub movie_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_url: String,
}

/// Display fields copied from the top search result when a term is first
/// recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeed {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
}

impl TrendRecord {
    /// A fresh record for `search_term` with `count = 1`.
    pub fn first(id: impl Into<String>, search_term: &str, seed: &TrendSeed) -> Self {
        Self {
            id: id.into(),
            search_term: search_term.to_string(),
            count: 1,
            movie_id: seed.movie_id,
            title: seed.title.clone(),
            poster_url: seed.poster_url.clone(),
        }
    }
}
