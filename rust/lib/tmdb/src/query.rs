/// The two request shapes the app issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// `GET /search/movie?query=…` for a non-empty search term.
    Search(String),
    /// `GET /discover/movie?sort_by=popularity.desc` when there is no term.
    Discover,
}

impl MovieQuery {
    /// Pick the variant for raw search-box text. Whitespace-only input
    /// counts as empty.
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            "" => MovieQuery::Discover,
            term => MovieQuery::Search(term.to_string()),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            MovieQuery::Search(_) => "/search/movie",
            MovieQuery::Discover => "/discover/movie",
        }
    }

    /// Query-string pairs; values are URL-encoded by the HTTP client.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            MovieQuery::Search(term) => vec![("query", term.as_str())],
            MovieQuery::Discover => vec![("sort_by", "popularity.desc")],
        }
    }

    /// The search term, `None` for discover.
    pub fn term(&self) -> Option<&str> {
        match self {
            MovieQuery::Search(term) => Some(term),
            MovieQuery::Discover => None,
        }
    }
}
