//! Search requests.

/// One edit of the search box. Updates `search/input` immediately and
/// fetches once the text has been stable for the debounce delay.
#[derive(Debug, Clone)]
pub struct SearchTypeReq {
    pub text: String,
}

impl SearchTypeReq {
    pub const PATH: &'static str = "search/type";
}

/// Fetch now, skipping the debounce delay.
#[derive(Debug, Clone)]
pub struct SearchQueryReq {
    pub query: String,
}

impl SearchQueryReq {
    pub const PATH: &'static str = "search/query";
}
