use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TrendError;
use crate::model::{TrendRecord, TrendSeed};
use crate::traits::TrendStore;

/// In-process trend store for runs without a configured document backend.
///
/// Records live for the lifetime of the process. Ids are `mem-{n}`.
#[derive(Default)]
pub struct MemoryTrendStore {
    records: RwLock<Vec<TrendRecord>>,
    next_id: AtomicU64,
}

impl MemoryTrendStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with existing records.
    pub fn with_records(records: Vec<TrendRecord>) -> Self {
        let next = records.len() as u64;
        Self {
            records: RwLock::new(records),
            next_id: AtomicU64::new(next),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<TrendRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<TrendRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl TrendStore for MemoryTrendStore {
    async fn top(&self, limit: usize) -> Result<Vec<TrendRecord>, TrendError> {
        let mut all = self.read().clone();
        // Stable: equal counts keep insertion order.
        all.sort_by(|a, b| b.count.cmp(&a.count));
        all.truncate(limit);
        Ok(all)
    }

    async fn find(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError> {
        let records = self.read();
        Ok(records.iter().find(|r| r.search_term == search_term).cloned())
    }

    async fn create(&self, search_term: &str, seed: &TrendSeed) -> Result<TrendRecord, TrendError> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = TrendRecord::first(format!("mem-{n}"), search_term, seed);
        self.write().push(record.clone());
        Ok(record)
    }

    async fn increment(&self, record: &TrendRecord) -> Result<TrendRecord, TrendError> {
        let mut records = self.write();
        let stored = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| TrendError::NotFound(record.id.clone()))?;
        stored.count += 1;
        Ok(stored.clone())
    }
}
