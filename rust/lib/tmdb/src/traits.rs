use crate::error::SourceError;
use crate::model::MoviePage;
use crate::query::MovieQuery;

/// MovieSource is the read side of the remote movie catalogue.
///
/// One call is one HTTP round trip; implementations do not retry.
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync + 'static {
    async fn fetch(&self, query: &MovieQuery) -> Result<MoviePage, SourceError>;
}
