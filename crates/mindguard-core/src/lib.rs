//! # MindGuard Core Library
//!
//! Stress assessment and engagement tracking for daily wellbeing check-ins.
//! The CLI is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Stress Classifier**: pure, priority-ordered rules mapping sleep,
//!   workload and mood to a stress level, plus fixed advice lookups
//! - **Engagement Tracker**: day-granular streak and reward state machine,
//!   exactly-once per calendar day
//! - **Check-in service**: orchestration over an injected store and clock,
//!   with optimistic-concurrency retries around the streak update
//! - **Storage**: SQLite and in-memory stores, TOML configuration
//! - **Companion**: optional conversational endpoint, never on the
//!   classification path
//!
//! ## Key Components
//!
//! - [`classify`]: validate and classify one check-in
//! - [`record_check_in`]: pure streak transition
//! - [`CheckInService`]: classify, persist, advance the streak
//! - [`Database`]: SQLite persistence
//! - [`Config`]: application configuration management

pub mod checkin;
pub mod clock;
pub mod companion;
pub mod engagement;
pub mod error;
pub mod storage;
pub mod stress;

pub use checkin::{check_in, CheckInReceipt, CheckInService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use companion::CompanionClient;
pub use engagement::{
    record_check_in, CheckInOutcome, Milestone, RewardPolicy, StreakRecord, Transition,
};
pub use error::{CompanionError, ConfigError, CoreError, StoreError, ValidationError};
pub use storage::{
    Config, Database, MemoryStore, ReportStore, StoredReport, StreakStore,
};
pub use stress::{
    advice_for, classify, daily_trend, summarize, Advice, CheckInInput, DailyStress, StressLevel,
    StressReport, TrendSummary,
};
