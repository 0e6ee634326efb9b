//! In-process streak store.
//!
//! Backs the `memory` backend and stands in for SQLite in tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::StreakStore;
use crate::error::StoreError;
use crate::streak::StreakRecord;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, StreakRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_records(records: impl IntoIterator<Item = StreakRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.user_id.clone(), r))
            .collect();
        Self {
            records: Mutex::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StreakRecord>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl StreakStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    fn put(&self, record: &StreakRecord) -> Result<(), StoreError> {
        self.lock()?.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    fn put_if_unchanged(
        &self,
        record: &StreakRecord,
        expected: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut records = self.lock()?;
        let stored = records
            .get(&record.user_id)
            .and_then(|r| r.last_check_date.as_deref());
        if stored != expected {
            return Ok(false);
        }
        records.insert(record.user_id.clone(), record.clone());
        Ok(true)
    }

    fn delete(&self, user_id: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(user_id).is_some())
    }
}
