use crate::error::TrendError;
use crate::model::{TrendRecord, TrendSeed};

/// TrendStore records how often each search term was used and ranks terms
/// by that count.
///
/// The four primitives map one-to-one onto document store operations;
/// `record_search` composes them into find-then-increment-or-create.
#[async_trait::async_trait]
pub trait TrendStore: Send + Sync + 'static {
    /// Up to `limit` records, highest `count` first.
    async fn top(&self, limit: usize) -> Result<Vec<TrendRecord>, TrendError>;

    /// The record whose `search_term` equals `search_term` exactly.
    async fn find(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError>;

    /// Create a record with `count = 1`.
    async fn create(&self, search_term: &str, seed: &TrendSeed) -> Result<TrendRecord, TrendError>;

    /// Add one to an existing record's count. Returns the stored record.
    async fn increment(&self, record: &TrendRecord) -> Result<TrendRecord, TrendError>;

    /// Count one more search for `search_term`, creating the record from
    /// `seed` the first time the term is seen.
    async fn record_search(
        &self,
        search_term: &str,
        seed: &TrendSeed,
    ) -> Result<TrendRecord, TrendError> {
        match self.find(search_term).await? {
            Some(existing) => self.increment(&existing).await,
            None => self.create(search_term, seed).await,
        }
    }
}
