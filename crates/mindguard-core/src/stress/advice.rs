//! Fixed coping guidance keyed by stress level.
//!
//! Pure lookups. The conversational companion is a separate collaborator and
//! never replaces these texts.

use serde::Serialize;

use super::StressLevel;

/// Guidance rendered next to a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub level: StressLevel,
    pub summary: &'static str,
    pub steps: &'static [&'static str],
    /// Show the "seek professional help" alert
    pub alert: bool,
}

const HIGH_STEPS: &[&str] = &[
    "Reduce your workload where you can",
    "Avoid isolating yourself",
    "Practice guided breathing",
    "Talk to someone you trust",
    "If this continues, consult a psychologist, psychiatrist or primary care doctor",
];

const MEDIUM_STEPS: &[&str] = &[
    "Improve your sleep routine",
    "Take regular breaks",
    "Try light exercise or meditation",
    "Consider a counselor if it persists",
];

const LOW_STEPS: &[&str] = &[
    "Maintain your healthy routines",
    "Stay consistent",
    "Keep tracking daily",
];

/// Guidance for a single check-in.
pub fn advice_for(level: StressLevel) -> Advice {
    let (summary, steps) = match level {
        StressLevel::High => ("High stress detected.", HIGH_STEPS),
        StressLevel::Medium => ("Moderate stress.", MEDIUM_STEPS),
        StressLevel::Low => ("You're doing well.", LOW_STEPS),
    };
    Advice {
        level,
        summary,
        steps,
        alert: level.needs_professional_help(),
    }
}

/// Tips shown under a multi-day trend summary.
pub fn tips_for(level: StressLevel) -> &'static [&'static str] {
    match level {
        StressLevel::Low => &[
            "Your stress level is well managed",
            "Maintain healthy sleep habits",
            "Continue regular exercise",
        ],
        StressLevel::Medium => &[
            "Take short breaks during work",
            "Practice breathing exercises",
            "Limit caffeine intake",
        ],
        StressLevel::High => &[
            "Try meditation or yoga daily",
            "Reduce screen time",
            "Talk to a mental health professional",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_only_for_high() {
        assert!(advice_for(StressLevel::High).alert);
        assert!(!advice_for(StressLevel::Medium).alert);
        assert!(!advice_for(StressLevel::Low).alert);
    }

    #[test]
    fn test_each_level_has_distinct_guidance() {
        let high = advice_for(StressLevel::High);
        let medium = advice_for(StressLevel::Medium);
        let low = advice_for(StressLevel::Low);
        assert_ne!(high.summary, medium.summary);
        assert_ne!(medium.summary, low.summary);
        assert!(high.steps.iter().any(|s| s.contains("psychologist")));
    }

    #[test]
    fn test_trend_tips_are_three_per_level() {
        for level in [StressLevel::Low, StressLevel::Medium, StressLevel::High] {
            assert_eq!(tips_for(level).len(), 3);
        }
    }
}
