mod config;
pub mod database;
pub mod memory;

pub use config::{CheckInSettings, CompanionSettings, Config};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engagement::StreakRecord;
use crate::error::StoreError;
use crate::stress::{CheckInInput, StressReport};

/// Per-user streak persistence with conditional writes.
pub trait StreakStore {
    /// Fetch the user's record, `None` before the first check-in.
    fn load(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError>;

    /// Write `record` only if the stored state still matches what was read.
    ///
    /// `expected_last_check_in == None` means "no record yet" and the write
    /// is an insert-if-absent. Otherwise the write succeeds only while the
    /// stored `last_check_in_date` equals the expected date. A lost race
    /// returns [`StoreError::Conflict`].
    fn save(
        &self,
        user_id: &str,
        expected_last_check_in: Option<NaiveDate>,
        record: &StreakRecord,
    ) -> Result<(), StoreError>;
}

/// Append-only history of classifications.
pub trait ReportStore {
    fn append(
        &self,
        user_id: &str,
        report: &StressReport,
        input: &CheckInInput,
    ) -> Result<StoredReport, StoreError>;

    /// Newest first, at most `limit` entries.
    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<StoredReport>, StoreError>;
}

/// A persisted classification together with the raw signals behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub id: Uuid,
    pub user_id: String,
    #[serde(flatten)]
    pub report: StressReport,
    pub input: CheckInInput,
}

impl<S: StreakStore + ?Sized> StreakStore for &S {
    fn load(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        (**self).load(user_id)
    }

    fn save(
        &self,
        user_id: &str,
        expected_last_check_in: Option<NaiveDate>,
        record: &StreakRecord,
    ) -> Result<(), StoreError> {
        (**self).save(user_id, expected_last_check_in, record)
    }
}

impl<S: ReportStore + ?Sized> ReportStore for &S {
    fn append(
        &self,
        user_id: &str,
        report: &StressReport,
        input: &CheckInInput,
    ) -> Result<StoredReport, StoreError> {
        (**self).append(user_id, report, input)
    }

    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<StoredReport>, StoreError> {
        (**self).history(user_id, limit)
    }
}

/// Returns the MindGuard data directory.
///
/// `MINDGUARD_DATA_DIR` wins when set. Otherwise `~/.config/mindguard`, or
/// `~/.config/mindguard-dev` with `MINDGUARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("MINDGUARD_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MINDGUARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("mindguard-dev")
            } else {
                base_dir.join("mindguard")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
