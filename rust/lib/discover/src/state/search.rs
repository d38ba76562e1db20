//! Search results: stored at `movies/search`.

use cinefind_tmdb::Movie;

/// Where a fetch cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing requested yet.
    Idle,
    Loading,
    Success,
    Failure,
}

/// Outcome of the most recent fetch cycle. Replaced wholesale on every
/// transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Trimmed query the snapshot belongs to; empty for popular movies.
    pub query: String,
    pub movies: Vec<Movie>,
    pub error: Option<String>,
    pub phase: SearchPhase,
    /// Request ticket that produced this snapshot. 0 before any request.
    pub seq: u64,
}

/// The one thing the results area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    /// No fetch has started yet.
    Idle,
    Loading,
    Failed(&'a str),
    /// Fetch succeeded with no matches. Carries the query.
    Empty(&'a str),
    Results(&'a [Movie]),
}

impl SearchState {
    pub const PATH: &'static str = "movies/search";

    pub fn idle() -> Self {
        Self {
            query: String::new(),
            movies: Vec::new(),
            error: None,
            phase: SearchPhase::Idle,
            seq: 0,
        }
    }

    pub fn loading(query: &str, seq: u64) -> Self {
        Self {
            query: query.to_string(),
            movies: Vec::new(),
            error: None,
            phase: SearchPhase::Loading,
            seq,
        }
    }

    pub fn succeeded(query: &str, movies: Vec<Movie>, seq: u64) -> Self {
        Self {
            query: query.to_string(),
            movies,
            error: None,
            phase: SearchPhase::Success,
            seq,
        }
    }

    pub fn failed(query: &str, message: impl Into<String>, seq: u64) -> Self {
        Self {
            query: query.to_string(),
            movies: Vec::new(),
            error: Some(message.into()),
            phase: SearchPhase::Failure,
            seq,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn view(&self) -> SearchView<'_> {
        match self.phase {
            SearchPhase::Idle => SearchView::Idle,
            SearchPhase::Loading => SearchView::Loading,
            SearchPhase::Failure => {
                SearchView::Failed(self.error.as_deref().unwrap_or_default())
            }
            SearchPhase::Success if self.movies.is_empty() => SearchView::Empty(&self.query),
            SearchPhase::Success => SearchView::Results(&self.movies),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    #[test]
    fn loading_flag_follows_phase() {
        assert!(!SearchState::idle().is_loading());
        assert!(SearchState::loading("heat", 1).is_loading());
        assert!(!SearchState::succeeded("heat", vec![], 1).is_loading());
        assert!(!SearchState::failed("heat", "x", 1).is_loading());
    }

    #[test]
    fn exactly_one_view() {
        let movies = vec![movie(949, "Heat")];

        assert_eq!(SearchState::idle().view(), SearchView::Idle);
        assert_eq!(SearchState::loading("heat", 1).view(), SearchView::Loading);
        assert_eq!(
            SearchState::failed("heat", "Failed to fetch movies.", 1).view(),
            SearchView::Failed("Failed to fetch movies.")
        );
        assert_eq!(
            SearchState::succeeded("zzqx", vec![], 1).view(),
            SearchView::Empty("zzqx")
        );
        assert_eq!(
            SearchState::succeeded("heat", movies.clone(), 1).view(),
            SearchView::Results(&movies)
        );
    }

    #[test]
    fn empty_is_not_an_error() {
        let s = SearchState::succeeded("zzqx", vec![], 3);
        assert!(s.error.is_none());
        assert_ne!(s.view(), SearchView::Failed(""));
    }

    #[test]
    fn failure_clears_movies() {
        let s = SearchState::failed("heat", "boom", 2);
        assert!(s.movies.is_empty());
        assert_eq!(s.error.as_deref(), Some("boom"));
    }
}
