mod advice;
mod classifier;
mod trend;

pub use advice::{advice_for, tips_for, Advice};
pub use classifier::{
    classify, classify_input, CheckInInput, StressLevel, StressReport, MIN_SLEEP_HOURS,
    SCALE_MAX, SCALE_MIN,
};
pub use trend::{daily_trend, summarize, DailyStress, TrendSummary};
