mod rewards;
mod tracker;

pub use rewards::{Milestone, RewardPolicy};
pub use tracker::{record_check_in, CheckInOutcome, StreakRecord, Transition};
