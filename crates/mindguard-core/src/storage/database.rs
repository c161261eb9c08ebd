//! SQLite-based streak and report storage.
//!
//! Provides persistent storage for:
//! - One streak record per user, updated with conditional writes
//! - Append-only stress report history with the raw check-in signals

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{data_dir, ReportStore, StoredReport, StreakStore};
use crate::engagement::StreakRecord;
use crate::error::StoreError;
use crate::stress::{CheckInInput, StressLevel, StressReport};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite database for streaks and stress reports.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `<data dir>/mindguard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("mindguard.db");
        Self::open_at(&path)
    }

    /// Open a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        tracing::debug!(path = %path.display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS streaks (
                user_id            TEXT PRIMARY KEY,
                current_streak     INTEGER NOT NULL,
                longest_streak     INTEGER NOT NULL,
                reward_points      INTEGER NOT NULL,
                last_check_in_date TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS stress_reports (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL,
                level       TEXT NOT NULL,
                label       TEXT NOT NULL,
                score       INTEGER NOT NULL,
                sleep_hours REAL NOT NULL,
                workload    REAL NOT NULL,
                mood        REAL NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_stress_reports_user_created
                ON stress_reports(user_id, created_at);",
        )?;
        Ok(())
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| StoreError::Corrupt(format!("bad date '{raw}': {e}")))
}

fn to_sql_points(points: u64) -> Result<i64, StoreError> {
    i64::try_from(points)
        .map_err(|_| StoreError::Corrupt(format!("reward points {points} exceed storage range")))
}

struct StreakRow {
    current_streak: i64,
    longest_streak: i64,
    reward_points: i64,
    last_check_in_date: String,
}

impl StreakRow {
    fn into_record(self) -> Result<StreakRecord, StoreError> {
        let corrupt = |field: &str, value: i64| {
            StoreError::Corrupt(format!("negative or oversized {field}: {value}"))
        };
        Ok(StreakRecord {
            current_streak: u32::try_from(self.current_streak)
                .map_err(|_| corrupt("current_streak", self.current_streak))?,
            longest_streak: u32::try_from(self.longest_streak)
                .map_err(|_| corrupt("longest_streak", self.longest_streak))?,
            reward_points: u64::try_from(self.reward_points)
                .map_err(|_| corrupt("reward_points", self.reward_points))?,
            last_check_in_date: parse_date(&self.last_check_in_date)?,
        })
    }
}

impl StreakStore for Database {
    fn load(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        let row = self
            .conn()
            .query_row(
                "SELECT current_streak, longest_streak, reward_points, last_check_in_date
                 FROM streaks WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(StreakRow {
                        current_streak: row.get(0)?,
                        longest_streak: row.get(1)?,
                        reward_points: row.get(2)?,
                        last_check_in_date: row.get(3)?,
                    })
                },
            )
            .optional()?;

        row.map(StreakRow::into_record).transpose()
    }

    fn save(
        &self,
        user_id: &str,
        expected_last_check_in: Option<NaiveDate>,
        record: &StreakRecord,
    ) -> Result<(), StoreError> {
        let points = to_sql_points(record.reward_points)?;
        let last = format_date(record.last_check_in_date);
        let conn = self.conn();

        let changed = match expected_last_check_in {
            None => conn.execute(
                "INSERT INTO streaks
                    (user_id, current_streak, longest_streak, reward_points, last_check_in_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_id) DO NOTHING",
                params![
                    user_id,
                    record.current_streak,
                    record.longest_streak,
                    points,
                    last
                ],
            )?,
            Some(expected) => conn.execute(
                "UPDATE streaks
                 SET current_streak = ?2, longest_streak = ?3, reward_points = ?4,
                     last_check_in_date = ?5
                 WHERE user_id = ?1 AND last_check_in_date = ?6",
                params![
                    user_id,
                    record.current_streak,
                    record.longest_streak,
                    points,
                    last,
                    format_date(expected)
                ],
            )?,
        };

        if changed == 0 {
            tracing::debug!(user_id, ?expected_last_check_in, "conditional streak write rejected");
            return Err(StoreError::Conflict {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }
}

impl ReportStore for Database {
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
        self.conn().execute(
            "INSERT INTO stress_reports
                (id, user_id, level, label, score, sleep_hours, workload, mood, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                stored.id.to_string(),
                user_id,
                report.level.as_str(),
                report.label,
                report.score,
                input.sleep_hours,
                input.workload,
                input.mood,
                report
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(stored)
    }

    fn history(&self, user_id: &str, limit: usize) -> Result<Vec<StoredReport>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, level, label, score, sleep_hours, workload, mood, created_at
             FROM stress_reports
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![user_id, limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (id, level, label, score, sleep_hours, workload, mood, created_at) = row?;
            let id = Uuid::parse_str(&id)
                .map_err(|e| StoreError::Corrupt(format!("bad report id '{id}': {e}")))?;
            let level: StressLevel = level.parse().map_err(StoreError::Corrupt)?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{created_at}': {e}")))?
                .with_timezone(&Utc);

            history.push(StoredReport {
                id,
                user_id: user_id.to_string(),
                report: StressReport {
                    level,
                    label,
                    score,
                    created_at,
                },
                input: CheckInInput {
                    sleep_hours,
                    workload,
                    mood,
                },
            });
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::classify_input;
    use chrono::{Duration, TimeZone};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn record(streak: u32, last: NaiveDate) -> StreakRecord {
        StreakRecord {
            current_streak: streak,
            longest_streak: streak,
            reward_points: u64::from(streak) * 10,
            last_check_in_date: last,
        }
    }

    #[test]
    fn test_load_missing_user() {
        let db = Database::open_memory().unwrap();
        assert!(db.load("nobody").unwrap().is_none());
    }

    #[test]
    fn test_insert_then_load() {
        let db = Database::open_memory().unwrap();
        db.save("u1", None, &record(1, date(1))).unwrap();
        assert_eq!(db.load("u1").unwrap(), Some(record(1, date(1))));
    }

    #[test]
    fn test_second_insert_conflicts() {
        let db = Database::open_memory().unwrap();
        db.save("u1", None, &record(1, date(1))).unwrap();
        let err = db.save("u1", None, &record(1, date(2))).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(db.load("u1").unwrap().unwrap().last_check_in_date, date(1));
    }

    #[test]
    fn test_update_requires_matching_date() {
        let db = Database::open_memory().unwrap();
        db.save("u1", None, &record(1, date(1))).unwrap();

        let stale = db.save("u1", Some(date(5)), &record(2, date(6)));
        assert!(matches!(stale, Err(StoreError::Conflict { .. })));

        db.save("u1", Some(date(1)), &record(2, date(2))).unwrap();
        assert_eq!(db.load("u1").unwrap(), Some(record(2, date(2))));
    }

    #[test]
    fn test_report_history_roundtrip() {
        let db = Database::open_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2026, 8, 1, 7, 0, 0).unwrap();
        let calm = CheckInInput::new(8.0, 3.0, 9.0).unwrap();
        let rough = CheckInInput::new(4.0, 9.0, 2.0).unwrap();

        db.append("u1", &classify_input(&calm, base).unwrap(), &calm).unwrap();
        db.append("u2", &classify_input(&calm, base).unwrap(), &calm).unwrap();
        let latest = db
            .append("u1", &classify_input(&rough, base + Duration::hours(1)).unwrap(), &rough)
            .unwrap();

        let history = db.history("u1", 10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], latest);
        assert_eq!(history[0].report.level, StressLevel::High);
        assert_eq!(history[1].input, calm);
        assert_eq!(history[1].report.created_at, base);
    }

    #[test]
    fn test_history_limit() {
        let db = Database::open_memory().unwrap();
        let input = CheckInInput::new(7.0, 5.0, 6.0).unwrap();
        for i in 0..5 {
            let at = Utc::now() + Duration::minutes(i);
            db.append("u1", &classify_input(&input, at).unwrap(), &input).unwrap();
        }
        assert_eq!(db.history("u1", 3).unwrap().len(), 3);
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mindguard.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.save("u1", None, &record(3, date(3))).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.load("u1").unwrap(), Some(record(3, date(3))));
    }
}
