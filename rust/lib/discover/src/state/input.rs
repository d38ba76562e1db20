//! Search box text: stored at `search/input`.

/// Raw text currently in the search box, updated on every keystroke
/// before debouncing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput(pub String);

impl SearchInput {
    pub const PATH: &'static str = "search/input";

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
