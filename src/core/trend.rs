//! Daily satisfaction trend.
//!
//! Surveys are bucketed by their UTC calendar day. Every day of the range
//! is emitted exactly once in ascending order; a day without surveys is a
//! gap (`avg_rating: None`, `survey_count: 0`) and is never interpolated.

use crate::core::{DailyTrendPoint, DayRange, SatisfactionSurvey};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Rounds to one decimal place, halves toward positive infinity.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0 + 0.5).floor() / 10.0;
    // keep -0.0 out of the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    rating_sum: u64,
    count: u64,
}

pub fn daily_trend(
    surveys: &[SatisfactionSurvey],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyTrendPoint>> {
    let range = DayRange::new(start, end)?;
    Ok(trend_for_range(surveys, &range))
}

pub fn trend_for_range(surveys: &[SatisfactionSurvey], range: &DayRange) -> Vec<DailyTrendPoint> {
    let window = range.window();
    let mut buckets: HashMap<NaiveDate, Bucket> = HashMap::new();
    for survey in surveys.iter().filter(|s| window.contains(s.created_at())) {
        let bucket = buckets.entry(survey.day()).or_default();
        bucket.rating_sum += u64::from(survey.rating());
        bucket.count += 1;
    }

    range
        .iter_days()
        .map(|date| match buckets.get(&date) {
            Some(bucket) if bucket.count > 0 => DailyTrendPoint {
                date,
                avg_rating: Some(round_to_tenth(
                    bucket.rating_sum as f64 / bucket.count as f64,
                )),
                survey_count: bucket.count,
            },
            _ => DailyTrendPoint {
                date,
                avg_rating: None,
                survey_count: 0,
            },
        })
        .collect()
}
