//! Property tests for the streak state machine.

use chrono::{Days, NaiveDate};
use mindguard_core::{record_check_in, RewardPolicy, StreakRecord, Transition};
use proptest::prelude::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()
}

proptest! {
    #[test]
    fn longest_streak_is_a_running_maximum(steps in prop::collection::vec(0u64..4, 1..120)) {
        let policy = RewardPolicy::default();
        let mut record: Option<StreakRecord> = None;
        let mut today = start();
        let mut max_seen = 0u32;

        for step in steps {
            today = today + Days::new(step);
            let outcome = record_check_in("p", today, record.as_ref(), &policy).unwrap();
            let next = &outcome.record;

            max_seen = max_seen.max(next.current_streak);
            prop_assert!(next.longest_streak >= next.current_streak);
            prop_assert_eq!(next.longest_streak, max_seen);

            if let Some(prev) = &record {
                prop_assert!(next.reward_points >= prev.reward_points);
                prop_assert!(next.last_check_in_date >= prev.last_check_in_date);
                prop_assert_eq!(next.reward_points - prev.reward_points, outcome.points_earned);
            }
            record = Some(outcome.record);
        }
    }

    #[test]
    fn streak_matches_consecutive_run_length(steps in prop::collection::vec(0u64..3, 1..60)) {
        let policy = RewardPolicy::default();
        let mut record: Option<StreakRecord> = None;
        let mut today = start();
        let mut run = 0u32;

        for step in steps {
            today = today + Days::new(step);
            run = match (&record, step) {
                (None, _) => 1,
                (Some(_), 0) => run,
                (Some(_), 1) => run + 1,
                (Some(_), _) => 1,
            };
            let outcome = record_check_in("p", today, record.as_ref(), &policy).unwrap();
            prop_assert_eq!(outcome.record.current_streak, run);
            if record.is_some() && step == 0 {
                prop_assert_eq!(outcome.transition, Transition::AlreadyCheckedIn);
                prop_assert_eq!(outcome.points_earned, 0);
            }
            record = Some(outcome.record);
        }
    }

    #[test]
    fn same_day_repeat_is_idempotent(streak in 1u32..100, points in 0u64..10_000) {
        let record = StreakRecord {
            current_streak: streak,
            longest_streak: streak,
            reward_points: points,
            last_check_in_date: start(),
        };
        let outcome = record_check_in("p", start(), Some(&record), &RewardPolicy::default()).unwrap();
        prop_assert_eq!(outcome.record, record);
        prop_assert_eq!(outcome.points_earned, 0);
    }

    #[test]
    fn earlier_day_is_always_rejected(back in 1u64..400) {
        let record = StreakRecord {
            current_streak: 2,
            longest_streak: 5,
            reward_points: 70,
            last_check_in_date: start(),
        };
        let earlier = start() - Days::new(back);
        prop_assert!(record_check_in("p", earlier, Some(&record), &RewardPolicy::default()).is_err());
    }
}
