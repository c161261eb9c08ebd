//! Day-bucketed stress trend and its summary.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use super::advice::tips_for;
use super::{StressLevel, StressReport};

/// Reports that fell on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStress {
    pub date: NaiveDate,
    pub count: u32,
    pub average_score: f64,
}

/// Overall reading of a series of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub level: StressLevel,
    pub heading: &'static str,
    /// Mean of the daily average scores
    pub average: f64,
    pub tips: &'static [&'static str],
}

/// Bucket reports by calendar day in `offset`, oldest day first.
pub fn daily_trend(reports: &[StressReport], offset: FixedOffset) -> Vec<DailyStress> {
    let mut buckets: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for report in reports {
        let day = report.created_at.with_timezone(&offset).date_naive();
        let entry = buckets.entry(day).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u32::from(report.score);
    }

    buckets
        .into_iter()
        .map(|(date, (count, total))| DailyStress {
            date,
            count,
            average_score: f64::from(total) / f64::from(count),
        })
        .collect()
}

/// Summarise a trend. Returns `None` for an empty series.
pub fn summarize(days: &[DailyStress]) -> Option<TrendSummary> {
    if days.is_empty() {
        return None;
    }
    let average = days.iter().map(|d| d.average_score).sum::<f64>() / days.len() as f64;

    let (level, heading) = if average <= 3.0 {
        (StressLevel::Low, "Low Stress")
    } else if average <= 6.0 {
        (StressLevel::Medium, "Moderate Stress")
    } else {
        (StressLevel::High, "High Stress")
    };

    Some(TrendSummary {
        level,
        heading,
        average,
        tips: tips_for(level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn report(level: StressLevel, at: DateTime<Utc>) -> StressReport {
        StressReport {
            level,
            label: level.label().to_string(),
            score: level.score(),
            created_at: at,
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_buckets_by_day_in_order() {
        let reports = vec![
            report(StressLevel::High, Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).unwrap()),
            report(StressLevel::Low, Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap()),
            report(StressLevel::Low, Utc.with_ymd_and_hms(2026, 5, 2, 20, 0, 0).unwrap()),
        ];

        let days = daily_trend(&reports, utc());
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        assert_eq!(days[0].count, 1);
        assert_eq!(days[0].average_score, 3.0);
        assert_eq!(days[1].count, 2);
        assert_eq!(days[1].average_score, 6.0);
    }

    #[test]
    fn test_offset_moves_late_reports_to_next_day() {
        let reports = vec![report(
            StressLevel::Medium,
            Utc.with_ymd_and_hms(2026, 5, 1, 23, 30, 0).unwrap(),
        )];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        let days = daily_trend(&reports, tokyo);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }

    #[test]
    fn test_summary_thresholds() {
        let day = |score: f64| DailyStress {
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            count: 1,
            average_score: score,
        };

        assert_eq!(summarize(&[day(3.0)]).unwrap().level, StressLevel::Low);
        assert_eq!(summarize(&[day(3.0), day(9.0)]).unwrap().level, StressLevel::Medium);
        assert_eq!(summarize(&[day(6.0), day(9.0)]).unwrap().level, StressLevel::High);

        let summary = summarize(&[day(6.0)]).unwrap();
        assert_eq!(summary.heading, "Moderate Stress");
        assert_eq!(summary.tips.len(), 3);
    }

    #[test]
    fn test_empty_series_has_no_summary() {
        assert!(summarize(&[]).is_none());
        assert!(daily_trend(&[], utc()).is_empty());
    }
}
