//! In-process store backed by mutex-guarded maps.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use super::{ReportStore, StoredReport, StreakStore};
use crate::engagement::StreakRecord;
use crate::error::StoreError;
use crate::stress::{CheckInInput, StressReport};

/// Thread-safe in-memory implementation of both store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    streaks: Mutex<HashMap<String, StreakRecord>>,
    reports: Mutex<Vec<StoredReport>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or overwrite a record unconditionally.
    pub fn insert(&self, user_id: &str, record: StreakRecord) {
        lock(&self.streaks).insert(user_id.to_string(), record);
    }
}

// A poisoned lock only means another thread panicked mid-test; the map
// itself is never left half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StreakStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        Ok(lock(&self.streaks).get(user_id).cloned())
    }

    fn save(
        &self,
        user_id: &str,
        expected_last_check_in: Option<NaiveDate>,
        record: &StreakRecord,
    ) -> Result<(), StoreError> {
        let mut streaks = lock(&self.streaks);
        let current = streaks.get(user_id).map(|r| r.last_check_in_date);
        if current != expected_last_check_in {
            return Err(StoreError::Conflict {
                user_id: user_id.to_string(),
            });
        }
        streaks.insert(user_id.to_string(), record.clone());
        Ok(())
    }
}

impl ReportStore for MemoryStore {
    fn append(
        &self,
        user_id: &str,
        report: &StressReport,
        input: &CheckInInput,
    ) -> Result<StoredReport, StoreError> {
        let stored = StoredReport {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            report: report.clone(),
            input: *input,
        };
        lock(&self.reports).push(stored.clone());
        Ok(stored)
    }

    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<StoredReport>, StoreError> {
        let reports = lock(&self.reports);
        Ok(reports
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
