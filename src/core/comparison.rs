//! Period-over-period satisfaction comparison.
//!
//! A period's `average_rating` is the mean of its *daily* means, so every
//! day with data carries the same weight whatever its survey volume. This
//! is not the mean of all individual ratings.

use crate::core::trend::{round_to_tenth, trend_for_range};
use crate::core::{
    ComparisonDelta, DailyTrendPoint, DayRange, PeriodComparison, PeriodStats, PeriodSummary,
    SatisfactionSurvey,
};

pub fn period_stats(trend: &[DailyTrendPoint]) -> PeriodStats {
    let daily_means: Vec<f64> = trend.iter().filter_map(|point| point.avg_rating).collect();
    let average_rating = if daily_means.is_empty() {
        0.0
    } else {
        round_to_tenth(daily_means.iter().sum::<f64>() / daily_means.len() as f64)
    };

    PeriodStats {
        average_rating,
        total_surveys: trend.iter().map(|point| point.survey_count).sum(),
        days_with_data: daily_means.len() as u64,
    }
}

pub fn summarize_period(surveys: &[SatisfactionSurvey], range: &DayRange) -> PeriodSummary {
    let trend = trend_for_range(surveys, range);
    let stats = period_stats(&trend);
    PeriodSummary {
        range: *range,
        trend,
        stats,
    }
}

/// Deltas of `current` relative to `baseline`. A baseline average of zero
/// (no data) yields a percentage change of zero.
pub fn delta(current: &PeriodStats, baseline: &PeriodStats) -> ComparisonDelta {
    let rating_change = round_to_tenth(current.average_rating - baseline.average_rating);
    let percentage_change = if baseline.average_rating > 0.0 {
        round_to_tenth(rating_change / baseline.average_rating * 100.0)
    } else {
        0.0
    };

    ComparisonDelta {
        rating_change,
        percentage_change,
        survey_count_change: current.total_surveys as i64 - baseline.total_surveys as i64,
    }
}

/// Runs the trend independently over both ranges. Overlapping or unequal
/// ranges are accepted as given.
pub fn compare_periods(
    period1_surveys: &[SatisfactionSurvey],
    period1: &DayRange,
    period2_surveys: &[SatisfactionSurvey],
    period2: &DayRange,
) -> PeriodComparison {
    let period1 = summarize_period(period1_surveys, period1);
    let period2 = summarize_period(period2_surveys, period2);
    let comparison = delta(&period1.stats, &period2.stats);
    PeriodComparison {
        period1,
        period2,
        comparison,
    }
}
