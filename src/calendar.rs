// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date bucketing: day keys, Monday-based weeks and the month grid.
//!
//! Weeks start Monday. Bucketing always keys on the Monday week-start
//! date; the ISO week number is a display label only, so year-boundary
//! weeks stay unambiguous.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Activity, Sport};

/// A month grid is always 6 full Monday-to-Sunday rows.
pub const GRID_DAYS: usize = 42;

/// One cell of the 42-day month grid.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayCell {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// False for the leading/trailing context days of adjacent months
    /// (rendered dimmed).
    pub in_month: bool,
    /// Sports practiced on this day, derived from the collection.
    pub sports: Vec<Sport>,
}

/// One day of a selected week, with its activities.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekDay {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}

/// Reduce a timestamp to its calendar-day identity. Two timestamps on
/// the same day map to the same key regardless of time-of-day.
pub fn day_key(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// The most recent Monday on or before the given date. A Monday is
/// its own week start.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_into_week = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(days_into_week))
        .unwrap_or(date)
}

/// ISO-8601 week number of a week-start date (the week containing the
/// year's first Thursday is week 1). Display label only.
pub fn iso_week_number(week_start: NaiveDate) -> u32 {
    week_start.iso_week().week()
}

/// Build the month grid for a year and zero-based month index.
///
/// Returns exactly [`GRID_DAYS`] consecutive days starting from the
/// Monday on-or-before the 1st, covering the whole month plus the
/// context days that fill the first and last weeks. `None` for an
/// out-of-range month or year.
pub fn build_month_grid(
    year: i32,
    month0: u32,
    activities: &[Activity],
) -> Option<Vec<DayCell>> {
    if month0 > 11 {
        return None;
    }
    let first_of_month = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    let start = week_start(first_of_month);

    let mut sports_by_day: HashMap<NaiveDate, BTreeSet<Sport>> = HashMap::new();
    for activity in activities {
        sports_by_day
            .entry(day_key(activity.date))
            .or_default()
            .insert(activity.sport);
    }

    let cells = (0..GRID_DAYS as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| DayCell {
            date,
            in_month: date.year() == year && date.month0() == month0,
            sports: sports_by_day
                .get(&date)
                .map(|sports| sports.iter().copied().collect())
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    (cells.len() == GRID_DAYS).then_some(cells)
}

/// Bucket activities into the 7 days of the week starting at the
/// given Monday. Within a day, most recent first.
pub fn bucket_week(week_start: NaiveDate, activities: &[Activity]) -> Vec<WeekDay> {
    (0..7_u64)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .map(|date| {
            let mut todays: Vec<Activity> = activities
                .iter()
                .filter(|a| day_key(a.date) == date)
                .cloned()
                .collect();
            todays.sort_by(|a, b| b.date.cmp(&a.date));
            WeekDay {
                date,
                activities: todays,
            }
        })
        .collect()
}
