//! Check-in orchestration.
//!
//! Wires the classifier and the streak tracker to the injected store and
//! clock. The streak update is a read-modify-write guarded by the store's
//! conditional write: a lost race re-reads and recomputes, up to a bounded
//! number of attempts, so concurrent submissions for one user never award
//! the same day twice.

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::Clock;
use crate::engagement::{record_check_in, CheckInOutcome, RewardPolicy, StreakRecord, Transition};
use crate::error::{CoreError, Result, StoreError};
use crate::storage::{ReportStore, StoredReport, StreakStore};
use crate::stress::{advice_for, classify_input, Advice, CheckInInput};

/// Everything the presentation layer renders after a submission.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReceipt {
    pub report: StoredReport,
    pub advice: Advice,
    pub streak: CheckInOutcome,
}

/// Apply a check-in to the stored streak with optimistic retries.
///
/// Loads the user's record, computes the transition and writes it back with
/// a conditional save. On [`StoreError::Conflict`] the whole cycle is
/// repeated; after `max_attempts` losses the call fails with
/// [`CoreError::PersistenceConflict`]. Same-day repeats and clock skew never
/// write.
pub fn check_in<S: StreakStore + ?Sized>(
    store: &S,
    user_id: &str,
    today: NaiveDate,
    policy: &RewardPolicy,
    max_attempts: u32,
) -> Result<CheckInOutcome> {
    let attempts = max_attempts.max(1);

    for attempt in 1..=attempts {
        let existing = store.load(user_id)?;
        let outcome = record_check_in(user_id, today, existing.as_ref(), policy)?;

        if !outcome.is_write() {
            tracing::debug!(user_id, %today, "already checked in today");
            return Ok(outcome);
        }

        let expected = existing.as_ref().map(|r| r.last_check_in_date);
        match store.save(user_id, expected, &outcome.record) {
            Ok(()) => {
                log_outcome(user_id, &outcome);
                return Ok(outcome);
            }
            Err(StoreError::Conflict { .. }) => {
                tracing::warn!(user_id, attempt, attempts, "streak write conflicted, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(CoreError::PersistenceConflict {
        user_id: user_id.to_string(),
        attempts,
    })
}

fn log_outcome(user_id: &str, outcome: &CheckInOutcome) {
    let record = &outcome.record;
    match outcome.transition {
        Transition::Reset => tracing::info!(
            user_id,
            longest = record.longest_streak,
            "streak broken, starting over"
        ),
        _ => tracing::debug!(
            user_id,
            transition = ?outcome.transition,
            streak = record.current_streak,
            "streak advanced"
        ),
    }
    if let Some(milestone) = outcome.milestone {
        tracing::info!(
            user_id,
            streak = milestone.streak,
            bonus = milestone.bonus,
            "streak milestone reached"
        );
    }
    tracing::info!(
        user_id,
        points = outcome.points_earned,
        total = record.reward_points,
        "reward points awarded"
    );
}

/// Thin service over a store and a clock.
pub struct CheckInService<S, C> {
    store: S,
    clock: C,
    policy: RewardPolicy,
    max_attempts: u32,
}

impl<S, C> CheckInService<S, C>
where
    S: StreakStore + ReportStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            policy: RewardPolicy::default(),
            max_attempts: 3,
        }
    }

    pub fn with_policy(mut self, policy: RewardPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Classify, persist the report, then advance the streak.
    ///
    /// The report is appended before the streak update, so a classification
    /// stays in history even if the streak step fails (for example with
    /// [`CoreError::ClockSkew`]).
    pub fn submit(&self, user_id: &str, input: &CheckInInput) -> Result<CheckInReceipt> {
        // one reading, so the report and the streak agree on the day
        let (now, today) = self.clock.now_and_today();
        let report = classify_input(input, now)?;
        let stored = self.store.append(user_id, &report, input)?;
        tracing::debug!(user_id, level = report.level.as_str(), "stress report stored");

        let streak = check_in(&self.store, user_id, today, &self.policy, self.max_attempts)?;

        Ok(CheckInReceipt {
            advice: advice_for(report.level),
            report: stored,
            streak,
        })
    }

    /// Advance the streak without classifying anything.
    pub fn record_day(&self, user_id: &str) -> Result<CheckInOutcome> {
        check_in(
            &self.store,
            user_id,
            self.clock.today(),
            &self.policy,
            self.max_attempts,
        )
    }

    pub fn streak(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        Ok(self.store.load(user_id)?)
    }

    pub fn history(&self, user_id: &str, limit: usize) -> Result<Vec<StoredReport>> {
        Ok(self.store.history(user_id, limit)?)
    }
}
