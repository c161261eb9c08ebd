//! Day-based check-in streak state machine.
//!
//! Transitions are keyed on the day delta between `today` and the stored
//! `last_check_in_date`:
//!
//! ```text
//! no record  -> FirstCheckIn      streak = 1, +base
//! delta == 0 -> AlreadyCheckedIn  unchanged, +0
//! delta == 1 -> Continued         streak += 1, +base (+milestone bonus)
//! delta >= 2 -> Reset             streak = 1, +base
//! delta <  0 -> ClockSkew error
//! ```
//!
//! The transition is a pure function of `(today, existing)`. Persisting the
//! result is the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rewards::{Milestone, RewardPolicy};
use crate::error::{CoreError, Result};

/// Per-user streak and reward state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current_streak: u32,
    /// Historical maximum; never decreases
    pub longest_streak: u32,
    pub reward_points: u64,
    pub last_check_in_date: NaiveDate,
}

impl StreakRecord {
    fn first(today: NaiveDate, points: u64) -> Self {
        Self {
            current_streak: 1,
            longest_streak: 1,
            reward_points: points,
            last_check_in_date: today,
        }
    }
}

/// Which edge of the state machine a check-in took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    FirstCheckIn,
    AlreadyCheckedIn,
    Continued,
    Reset,
}

/// Result of applying one check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub record: StreakRecord,
    pub points_earned: u64,
    pub transition: Transition,
    pub milestone: Option<Milestone>,
}

impl CheckInOutcome {
    /// Whether the record needs to be written back.
    pub fn is_write(&self) -> bool {
        self.transition != Transition::AlreadyCheckedIn
    }
}

/// Apply a check-in on `today` to the user's existing record.
///
/// Repeated calls with the same `today` are no-ops. Fails with
/// [`CoreError::ClockSkew`] when `today` precedes the stored date; the
/// existing record is left untouched in that case.
pub fn record_check_in(
    user_id: &str,
    today: NaiveDate,
    existing: Option<&StreakRecord>,
    policy: &RewardPolicy,
) -> Result<CheckInOutcome> {
    let Some(existing) = existing else {
        return Ok(CheckInOutcome {
            record: StreakRecord::first(today, policy.base_points),
            points_earned: policy.base_points,
            transition: Transition::FirstCheckIn,
            milestone: None,
        });
    };

    let delta = today
        .signed_duration_since(existing.last_check_in_date)
        .num_days();

    match delta {
        d if d < 0 => Err(CoreError::ClockSkew {
            user_id: user_id.to_string(),
            today,
            last_check_in: existing.last_check_in_date,
        }),
        0 => Ok(CheckInOutcome {
            record: existing.clone(),
            points_earned: 0,
            transition: Transition::AlreadyCheckedIn,
            milestone: None,
        }),
        1 => {
            let current_streak = existing.current_streak.saturating_add(1);
            let (points, milestone) = policy.points_for(current_streak);
            Ok(CheckInOutcome {
                record: StreakRecord {
                    current_streak,
                    longest_streak: existing.longest_streak.max(current_streak),
                    reward_points: existing.reward_points.saturating_add(points),
                    last_check_in_date: today,
                },
                points_earned: points,
                transition: Transition::Continued,
                milestone,
            })
        }
        _ => Ok(CheckInOutcome {
            record: StreakRecord {
                current_streak: 1,
                longest_streak: existing.longest_streak.max(1),
                reward_points: existing.reward_points.saturating_add(policy.base_points),
                last_check_in_date: today,
            },
            points_earned: policy.base_points,
            transition: Transition::Reset,
            milestone: None,
        }),
    }
}
