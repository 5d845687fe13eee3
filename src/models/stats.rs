//! Per-sport derived statistics ("achievements").
//!
//! These are recomputed from the full activity collection on every
//! query; there is no caching or incremental update, so correctness
//! over the whole set holds every time.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, Sport};

const SECONDS_PER_WEEK: f64 = 7.0 * 86_400.0;

/// Derived statistics for one sport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SportStats {
    /// Longest single activity, all-time. Absent (not zero) when the
    /// sport has no activities, so the client can render "no data yet".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longest_distance_km: Option<f64>,
    /// Total distance since January 1 of the current year
    pub total_distance_km_ytd: f64,
    /// Total hours since January 1 of the current year
    pub total_hours_ytd: f64,
    /// Year-to-date activity count divided by weeks elapsed this year
    pub avg_activities_per_week_ytd: f64,
}

/// Compute derived statistics for one sport against a reference "now".
///
/// "now" is injectable so tests and the API can pin the year-to-date
/// window. Other sports never leak into the result.
pub fn stats_for(sport: Sport, activities: &[Activity], now: DateTime<Utc>) -> SportStats {
    let longest_distance_km = activities
        .iter()
        .filter(|a| a.sport == sport)
        .fold(None, |longest: Option<f64>, a| {
            Some(longest.map_or(a.distance_km, |d| d.max(a.distance_km)))
        });

    let mut count_ytd: u32 = 0;
    let mut total_distance_km_ytd = 0.0;
    let mut total_seconds_ytd: f64 = 0.0;

    // Year-to-date means date >= January 1 of now's year, which for a
    // calendar timestamp is simply "not an earlier year".
    for activity in activities
        .iter()
        .filter(|a| a.sport == sport && a.date.year() >= now.year())
    {
        count_ytd += 1;
        total_distance_km_ytd += activity.distance_km;
        total_seconds_ytd += f64::from(activity.duration_s);
    }

    // Floor of one week so January 1st neither divides by ~zero nor
    // inflates the average.
    let seconds_since_jan1 =
        f64::from(now.ordinal0()) * 86_400.0 + f64::from(now.num_seconds_from_midnight());
    let weeks_elapsed = (seconds_since_jan1 / SECONDS_PER_WEEK).max(1.0);

    SportStats {
        longest_distance_km,
        total_distance_km_ytd,
        total_hours_ytd: total_seconds_ytd / 3600.0,
        avg_activities_per_week_ytd: f64::from(count_ytd) / weeks_elapsed,
    }
}
