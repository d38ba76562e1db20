//! Trending list: stored at `movies/trending`.

use cinefind_trend::TrendRecord;

/// One row of the trending list. Rank is the position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingEntry {
    pub id: String,
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
}

impl From<TrendRecord> for TrendingEntry {
    fn from(r: TrendRecord) -> Self {
        Self {
            id: r.id,
            movie_id: r.movie_id,
            title: r.title,
            poster_url: r.poster_url,
        }
    }
}

/// Most-searched movies, highest count first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingState {
    pub entries: Vec<TrendingEntry>,
}

impl TrendingState {
    pub const PATH: &'static str = "movies/trending";

    /// `(rank, entry)` pairs, rank starting at 1.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &TrendingEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// The section is hidden when there is nothing to show.
    pub fn is_visible(&self) -> bool {
        !self.entries.is_empty()
    }
}
