//! App lifecycle requests.

/// Set default state, then load popular movies and the trending list.
#[derive(Debug, Clone)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}
