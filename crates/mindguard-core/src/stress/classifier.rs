//! Rule-based stress classification.
//!
//! Maps a day's self-reported sleep, workload and mood onto one of three
//! stress levels. The rules are evaluated in a fixed priority order and the
//! first match wins:
//!
//! ```text
//! sleep < 5 && workload > 7 && mood < 4   -> High   (9)
//! sleep < 6 || workload > 6               -> Medium (6)
//! otherwise                               -> Low    (3)
//! ```
//!
//! Input is validated before any rule runs, so a failed call never yields a
//! partial report. Classification itself is total over valid input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lower bound for sleep hours (no upper bound).
pub const MIN_SLEEP_HOURS: f64 = 0.0;
/// Inclusive range shared by the workload and mood scales.
pub const SCALE_MIN: f64 = 1.0;
pub const SCALE_MAX: f64 = 10.0;

/// One day's self-reported wellbeing signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckInInput {
    /// Hours slept last night
    pub sleep_hours: f64,
    /// Perceived workload, 1 (light) to 10 (crushing)
    pub workload: f64,
    /// Mood, 1 (very low) to 10 (great)
    pub mood: f64,
}

impl CheckInInput {
    /// Build a validated input from numeric values.
    pub fn new(sleep_hours: f64, workload: f64, mood: f64) -> Result<Self, ValidationError> {
        let input = Self {
            sleep_hours,
            workload,
            mood,
        };
        input.validate()?;
        Ok(input)
    }

    /// Build a validated input from raw form fields.
    ///
    /// Empty fields are reported as missing, anything that is not a finite
    /// number as non-numeric.
    pub fn parse(sleep_hours: &str, workload: &str, mood: &str) -> Result<Self, ValidationError> {
        Self::new(
            parse_field("sleep_hours", sleep_hours)?,
            parse_field("workload", workload)?,
            parse_field("mood", mood)?,
        )
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite("sleep_hours", self.sleep_hours)?;
        if self.sleep_hours < MIN_SLEEP_HOURS {
            return Err(ValidationError::BelowMinimum {
                field: "sleep_hours",
                value: self.sleep_hours,
                min: MIN_SLEEP_HOURS,
            });
        }
        require_scale("workload", self.workload)?;
        require_scale("mood", self.mood)?;
        Ok(())
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: trimmed.to_string(),
        })?;
    require_finite(field, value)?;
    Ok(value)
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        })
    }
}

fn require_scale(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: SCALE_MIN,
            max: SCALE_MAX,
        });
    }
    Ok(())
}

/// Classified stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    /// Numeric score plotted on the stress trend chart.
    pub fn score(&self) -> u8 {
        match self {
            StressLevel::Low => 3,
            StressLevel::Medium => 6,
            StressLevel::High => 9,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low Stress",
            StressLevel::Medium => "Medium Stress",
            StressLevel::High => "High Stress",
        }
    }

    /// Only high stress raises the "seek professional help" alert.
    pub fn needs_professional_help(&self) -> bool {
        matches!(self, StressLevel::High)
    }

    /// Inverse of [`StressLevel::score`].
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            3 => Some(StressLevel::Low),
            6 => Some(StressLevel::Medium),
            9 => Some(StressLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "low",
            StressLevel::Medium => "medium",
            StressLevel::High => "high",
        }
    }
}

impl std::str::FromStr for StressLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(StressLevel::Low),
            "medium" => Ok(StressLevel::Medium),
            "high" => Ok(StressLevel::High),
            other => Err(format!("unknown stress level: {other}")),
        }
    }
}

/// Result of one classification. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    pub level: StressLevel,
    pub label: String,
    pub score: u8,
    pub created_at: DateTime<Utc>,
}

impl StressReport {
    fn new(level: StressLevel, created_at: DateTime<Utc>) -> Self {
        Self {
            level,
            label: level.label().to_string(),
            score: level.score(),
            created_at,
        }
    }
}

/// Apply the priority-ordered rules to already validated input.
pub(crate) fn assess(input: &CheckInInput) -> StressLevel {
    let CheckInInput {
        sleep_hours,
        workload,
        mood,
    } = *input;

    if sleep_hours < 5.0 && workload > 7.0 && mood < 4.0 {
        StressLevel::High
    } else if sleep_hours < 6.0 || workload > 6.0 {
        StressLevel::Medium
    } else {
        StressLevel::Low
    }
}

/// Validate and classify a check-in, stamping the report with `now`.
pub fn classify(
    sleep_hours: f64,
    workload: f64,
    mood: f64,
    now: DateTime<Utc>,
) -> Result<StressReport, ValidationError> {
    let input = CheckInInput::new(sleep_hours, workload, mood)?;
    Ok(StressReport::new(assess(&input), now))
}

/// Classify an already built input.
///
/// The fields of [`CheckInInput`] are public, so the input is validated
/// again before any rule is applied.
pub fn classify_input(
    input: &CheckInInput,
    now: DateTime<Utc>,
) -> Result<StressReport, ValidationError> {
    input.validate()?;
    Ok(StressReport::new(assess(input), now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_high_stress_requires_all_three_signals() {
        let report = classify(4.9, 8.0, 3.0, now()).unwrap();
        assert_eq!(report.level, StressLevel::High);
        assert_eq!(report.score, 9);
        assert_eq!(report.label, "High Stress");
        assert_eq!(report.created_at, now());
    }

    #[test]
    fn test_sleep_boundary_is_strict() {
        // 5 hours falls out of the high branch but still under 6
        let report = classify(5.0, 8.0, 3.0, now()).unwrap();
        assert_eq!(report.level, StressLevel::Medium);
        assert_eq!(report.score, 6);
    }

    #[test]
    fn test_low_stress() {
        let report = classify(7.0, 5.0, 8.0, now()).unwrap();
        assert_eq!(report.level, StressLevel::Low);
        assert_eq!(report.score, 3);
    }

    #[test]
    fn test_medium_on_workload_alone() {
        assert_eq!(classify(8.0, 7.0, 9.0, now()).unwrap().level, StressLevel::Medium);
        assert_eq!(classify(8.0, 6.0, 9.0, now()).unwrap().level, StressLevel::Low);
    }

    #[test]
    fn test_medium_on_short_sleep_alone() {
        assert_eq!(classify(5.5, 1.0, 10.0, now()).unwrap().level, StressLevel::Medium);
        assert_eq!(classify(6.0, 1.0, 10.0, now()).unwrap().level, StressLevel::Low);
    }

    #[test]
    fn test_high_branch_needs_low_mood() {
        // mood 4 is not < 4, so the medium rule catches it
        assert_eq!(classify(3.0, 9.0, 4.0, now()).unwrap().level, StressLevel::Medium);
        // workload 7 is not > 7
        assert_eq!(classify(3.0, 7.0, 1.0, now()).unwrap().level, StressLevel::Medium);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = classify(4.0, 8.0, 2.0, now()).unwrap();
        let b = classify(4.0, 8.0, 2.0, now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_negative_sleep() {
        let err = classify(-0.5, 5.0, 5.0, now()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BelowMinimum { field: "sleep_hours", .. }
        ));
    }

    #[test]
    fn test_rejects_scale_out_of_range() {
        let err = classify(7.0, 0.0, 5.0, now()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "workload", .. }));

        let err = classify(7.0, 5.0, 10.5, now()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "mood", .. }));
    }

    #[test]
    fn test_scale_bounds_are_inclusive() {
        assert!(classify(0.0, 1.0, 10.0, now()).is_ok());
        assert!(classify(0.0, 10.0, 1.0, now()).is_ok());
    }

    #[test]
    fn test_rejects_nan_and_infinity() {
        let err = classify(f64::NAN, 5.0, 5.0, now()).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "sleep_hours", .. }));

        let err = classify(7.0, f64::INFINITY, 5.0, now()).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "workload", .. }));
    }

    #[test]
    fn test_parse_reports_missing_fields() {
        let err = CheckInInput::parse("7", "  ", "5").unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "workload" });
    }

    #[test]
    fn test_parse_reports_non_numeric_fields() {
        let err = CheckInInput::parse("seven", "5", "5").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotNumeric {
                field: "sleep_hours",
                value: "seven".to_string()
            }
        );

        let err = CheckInInput::parse("7", "5", "inf").unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "mood", .. }));
    }

    #[test]
    fn test_parse_accepts_padded_decimals() {
        let input = CheckInInput::parse(" 6.5 ", "4", "7").unwrap();
        assert_eq!(input.sleep_hours, 6.5);
        assert_eq!(assess(&input), StressLevel::Low);
    }

    #[test]
    fn test_classify_input_revalidates_hand_built_input() {
        let bad = CheckInInput {
            sleep_hours: f64::NAN,
            workload: 99.0,
            mood: -3.0,
        };
        let err = classify_input(&bad, now()).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric { field: "sleep_hours", .. }));

        let bad = CheckInInput {
            sleep_hours: 7.0,
            workload: 5.0,
            mood: 0.0,
        };
        let err = classify_input(&bad, now()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "mood", .. }));
    }

    #[test]
    fn test_classify_input_matches_classify() {
        let input = CheckInInput::new(4.0, 9.0, 2.0).unwrap();
        assert_eq!(
            classify_input(&input, now()).unwrap(),
            classify(4.0, 9.0, 2.0, now()).unwrap()
        );
    }

    #[test]
    fn test_level_score_roundtrip() {
        for level in [StressLevel::Low, StressLevel::Medium, StressLevel::High] {
            assert_eq!(StressLevel::from_score(level.score()), Some(level));
            assert_eq!(level.as_str().parse::<StressLevel>().unwrap(), level);
        }
        assert_eq!(StressLevel::from_score(5), None);
    }

    #[test]
    fn test_only_high_needs_professional_help() {
        assert!(StressLevel::High.needs_professional_help());
        assert!(!StressLevel::Medium.needs_professional_help());
        assert!(!StressLevel::Low.needs_professional_help());
    }
}
