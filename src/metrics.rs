// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sport-specific secondary metrics.
//!
//! Each sport derives one display metric from (duration, distance):
//! running pace, cycling speed, swimming pace per 100 m. The mapping
//! is a lookup table so a new sport is one table entry and one
//! formula, with no call-site changes.

use crate::duration::{format_duration, SENTINEL};
use crate::models::Sport;

/// How a sport turns canonical (seconds, kilometers) into a display metric.
struct SecondaryMetric {
    compute: fn(duration_s: f64, distance_km: f64) -> f64,
    render: fn(value: f64) -> String,
}

static RUN_PACE: SecondaryMetric = SecondaryMetric {
    compute: |duration_s, distance_km| duration_s / distance_km,
    render: |sec_per_km| format!("{} min/km", clock(sec_per_km)),
};

static CYCLE_SPEED: SecondaryMetric = SecondaryMetric {
    compute: |duration_s, distance_km| distance_km / (duration_s / 3600.0),
    render: |kph| format!("{:.1} km/t", kph),
};

// 1 km = 10 x 100 m
static SWIM_PACE: SecondaryMetric = SecondaryMetric {
    compute: |duration_s, distance_km| duration_s / (distance_km * 10.0),
    render: |sec_per_100m| format!("{} /100m", clock(sec_per_100m)),
};

fn metric_for(sport: Sport) -> &'static SecondaryMetric {
    match sport {
        Sport::Run => &RUN_PACE,
        Sport::Cycle => &CYCLE_SPEED,
        Sport::Swim => &SWIM_PACE,
    }
}

/// Derive the display metric for a sport.
///
/// Returns the sentinel "–" when duration or distance is zero,
/// negative or non-finite; never divides by zero, never propagates
/// NaN to display.
pub fn secondary_metric(sport: Sport, duration_s: f64, distance_km: f64) -> String {
    if !duration_s.is_finite()
        || !distance_km.is_finite()
        || duration_s <= 0.0
        || distance_km <= 0.0
    {
        return SENTINEL.to_string();
    }

    let metric = metric_for(sport);
    (metric.render)((metric.compute)(duration_s, distance_km))
}

/// Running pace, "M:SS min/km".
pub fn pace_min_per_km(duration_s: f64, distance_km: f64) -> String {
    secondary_metric(Sport::Run, duration_s, distance_km)
}

/// Cycling speed, "X.X km/t".
pub fn speed_kph(duration_s: f64, distance_km: f64) -> String {
    secondary_metric(Sport::Cycle, duration_s, distance_km)
}

/// Swimming pace, "M:SS /100m". Distance is in kilometers (meters
/// are normalized upstream).
pub fn swim_pace_per_100m(duration_s: f64, distance_km: f64) -> String {
    secondary_metric(Sport::Swim, duration_s, distance_km)
}

/// Render a positive second count as race-clock "M:SS" / "H:MM:SS".
fn clock(seconds: f64) -> String {
    format_duration(seconds.round() as i64)
}
