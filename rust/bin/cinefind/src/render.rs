//! Screen layout. Pure: state in, lines out.

use cinefind_discover::state::{SearchState, SearchView, TrendingState};
use cinefind_tmdb::Movie;

const TITLE: &str = "CineFind: find movies you'll enjoy without the hassle";
const HELP: &str = "type to search · Enter: search now · Esc: quit";
const NO_POSTER: &str = "[no poster]";

/// Lay out the whole screen.
pub fn render_screen(
    input: &str,
    search: &SearchState,
    trending: Option<&TrendingState>,
) -> Vec<String> {
    let mut lines = vec![
        TITLE.to_string(),
        String::new(),
        format!("Search: {input}_"),
        String::new(),
    ];

    if let Some(trending) = trending.filter(|t| t.is_visible()) {
        lines.push("Trending Movies".to_string());
        for (rank, entry) in trending.ranked() {
            let marker = if entry.poster_url.is_empty() {
                format!(" {NO_POSTER}")
            } else {
                String::new()
            };
            lines.push(format!("  {rank}. {}{marker}", entry.title));
        }
        lines.push(String::new());
    }

    lines.push("All Movies".to_string());
    match search.view() {
        SearchView::Idle => {}
        SearchView::Loading => lines.push("  Loading...".to_string()),
        SearchView::Failed(message) => lines.push(format!("  {message}")),
        SearchView::Empty("") => lines.push("  No movies found.".to_string()),
        SearchView::Empty(query) => lines.push(format!("  No movies found for {query}.")),
        SearchView::Results(movies) => lines.extend(movies.iter().map(movie_card)),
    }

    lines.push(String::new());
    lines.push(HELP.to_string());
    lines
}

/// One result row: title, rating, language, year.
pub fn movie_card(movie: &Movie) -> String {
    // TMDB reports 0 for titles nobody has rated yet.
    let rating = match movie.vote_average {
        Some(v) if v > 0.0 => format!("{v:.1}"),
        _ => "N/A".to_string(),
    };
    let language = movie
        .original_language
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or("N/A");
    let year = movie.release_year().unwrap_or("N/A");
    let has_poster = movie.poster_path.as_deref().is_some_and(|p| !p.is_empty());
    let marker = if has_poster { String::new() } else { format!(" {NO_POSTER}") };

    format!("  {}  ★ {rating} · {language} · {year}{marker}", movie.title)
}
