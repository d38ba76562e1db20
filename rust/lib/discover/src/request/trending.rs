/// Reload the trending list.
#[derive(Debug, Clone)]
pub struct TrendingLoadReq;

impl TrendingLoadReq {
    pub const PATH: &'static str = "trending/load";
}
