// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes: activity CRUD, derived statistics and calendar views.

use crate::calendar;
use crate::duration::{format_duration, parse_duration};
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::stats::stats_for;
use crate::models::{Activity, Sport, SportStats};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

// Limits carried over from the stored-record schema.
const MAX_TITLE_LEN: usize = 120;
const MAX_COMMENT_LEN: usize = 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities).post(create_activity))
        .route("/api/activities/{id}", delete(delete_activity))
        .route("/api/stats", get(get_stats))
        .route("/api/calendar", get(get_calendar))
        .route("/api/week", get(get_week))
}

// ─── Activities ──────────────────────────────────────────────

/// Activity as rendered to the client, with the display strings the
/// pure core derives (duration clock and sport-specific metric).
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    pub id: String,
    pub sport: Sport,
    pub distance_km: f64,
    pub duration_s: u32,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// "M:SS" / "H:MM:SS"
    pub duration_display: String,
    /// Pace or speed depending on sport, sentinel when non-computable
    pub secondary_metric: String,
}

impl From<Activity> for ActivitySummary {
    fn from(activity: Activity) -> Self {
        let duration_display = format_duration(i64::from(activity.duration_s));
        let secondary_metric = metrics::secondary_metric(
            activity.sport,
            f64::from(activity.duration_s),
            activity.distance_km,
        );
        Self {
            id: activity.id,
            sport: activity.sport,
            distance_km: activity.distance_km,
            duration_s: activity.duration_s,
            date: activity.date.to_rfc3339_opts(SecondsFormat::Secs, true),
            title: activity.title,
            comment: activity.comment,
            duration_display,
            secondary_metric,
        }
    }
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by sport name; unrecognized values are ignored (no filter)
    sport: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivitySummary>,
    pub total: u32,
}

/// List activities, most recent first, optionally filtered by sport.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    let sport = params.sport.as_deref().and_then(Sport::parse);

    tracing::debug!(sport = ?sport, "Fetching activities");

    let activities = state.db.list_activities(sport).await?;
    let summaries: Vec<ActivitySummary> =
        activities.into_iter().map(ActivitySummary::from).collect();
    let total = summaries.len() as u32;

    Ok(Json(ActivitiesResponse {
        activities: summaries,
        total,
    }))
}

/// Duration as entered in the form: either canonical seconds or one of
/// the clock string shapes.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum DurationInput {
    Seconds(f64),
    Clock(String),
}

#[derive(Deserialize)]
struct CreateActivityRequest {
    /// Defaults to "run"
    sport: Option<String>,
    distance_km: Option<f64>,
    duration: Option<DurationInput>,
    /// Defaults to now
    date: Option<DateTime<Utc>>,
    title: Option<String>,
    comment: Option<String>,
}

/// Record a new activity.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivitySummary>)> {
    let distance_km = req.distance_km.unwrap_or(f64::NAN);
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::BadRequest(
            "Distance must be a positive number (km)".to_string(),
        ));
    }

    let duration_s = resolve_duration(req.duration.as_ref())?;

    let sport = match req.sport.as_deref() {
        None => Sport::Run,
        Some(name) => Sport::parse(name).ok_or_else(|| {
            AppError::BadRequest("Invalid sport. Use 'run', 'cycle', or 'swim'.".to_string())
        })?,
    };

    let activity = Activity {
        id: uuid::Uuid::new_v4().to_string(),
        sport,
        distance_km,
        duration_s,
        date: req.date.unwrap_or_else(Utc::now),
        title: clean_text(req.title, MAX_TITLE_LEN, "Title")?,
        comment: clean_text(req.comment, MAX_COMMENT_LEN, "Comment")?,
    };

    state.db.create_activity(&activity).await?;

    tracing::info!(
        id = %activity.id,
        sport = activity.sport.as_str(),
        distance_km = activity.distance_km,
        duration_s = activity.duration_s,
        "Activity recorded"
    );

    Ok((StatusCode::CREATED, Json(ActivitySummary::from(activity))))
}

/// Resolve the form's duration field to canonical seconds.
///
/// A blank string is treated like a missing field; a non-blank string
/// that matches no accepted shape gets the validation message.
fn resolve_duration(input: Option<&DurationInput>) -> Result<u32> {
    let missing = || AppError::BadRequest("Duration is required".to_string());
    let non_positive =
        || AppError::BadRequest("Duration must be a positive number of seconds".to_string());

    let seconds = match input {
        None => return Err(missing()),
        Some(DurationInput::Seconds(secs)) => {
            if !secs.is_finite() || *secs <= 0.0 || *secs > f64::from(u32::MAX) {
                return Err(non_positive());
            }
            secs.round() as u32
        }
        Some(DurationInput::Clock(text)) => parse_duration(text)
            .map_err(|e| AppError::BadRequest(e.to_string()))?
            .ok_or_else(missing)?,
    };

    if seconds == 0 {
        return Err(non_positive());
    }
    Ok(seconds)
}

/// Trim optional free text; empty becomes absent, over-long is a 400.
fn clean_text(value: Option<String>, max_len: usize, field: &str) -> Result<Option<String>> {
    match value.map(|v| v.trim().to_string()) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if v.chars().count() > max_len => Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max_len
        ))),
        Some(v) => Ok(Some(v)),
    }
}

/// Delete an activity by ID.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(AppError::BadRequest("Invalid activity id".to_string()));
    }

    if state.db.get_activity(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Activity {} not found", id)));
    }

    state.db.delete_activity(&id).await?;
    tracing::info!(id = %id, "Activity deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ─── Derived Statistics ──────────────────────────────────────

#[derive(Deserialize)]
struct StatsQuery {
    /// Reference "now" (RFC3339), injectable for tests; defaults to now
    now: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    pub run: SportStats,
    pub cycle: SportStats,
    pub swim: SportStats,
}

/// Derived statistics per sport, recomputed from the full collection.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let now = parse_now(params.now.as_deref())?.unwrap_or_else(Utc::now);
    let activities = state.db.list_activities(None).await?;

    Ok(Json(StatsResponse {
        run: stats_for(Sport::Run, &activities, now),
        cycle: stats_for(Sport::Cycle, &activities, now),
        swim: stats_for(Sport::Swim, &activities, now),
    }))
}

fn parse_now(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                AppError::BadRequest("Invalid 'now' parameter: must be RFC3339 datetime".to_string())
            })
    })
    .transpose()
}

// ─── Calendar & Week Views ───────────────────────────────────

#[derive(Deserialize)]
struct CalendarQuery {
    year: i32,
    /// Zero-based month index (0 = January)
    month: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    /// Exactly 42 cells: 6 Monday-to-Sunday rows
    pub cells: Vec<calendar::DayCell>,
}

/// The 42-cell month grid with the sports practiced on each day.
async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let invalid_month = || {
        AppError::BadRequest("Invalid month: expected a year and a 0-11 month index".to_string())
    };
    if params.month > 11 {
        return Err(invalid_month());
    }

    let activities = state.db.list_activities(None).await?;

    let cells = calendar::build_month_grid(params.year, params.month, &activities)
        .ok_or_else(invalid_month)?;

    Ok(Json(CalendarResponse {
        year: params.year,
        month: params.month,
        cells,
    }))
}

#[derive(Deserialize)]
struct WeekQuery {
    /// Any date within the wanted week (YYYY-MM-DD); snapped to its Monday
    start: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekDaySummary {
    pub date: String,
    pub activities: Vec<ActivitySummary>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekResponse {
    pub week_start: String,
    /// ISO-8601 week number, display label only
    pub iso_week: u32,
    pub days: Vec<WeekDaySummary>,
}

/// One Monday-to-Sunday week of activities, bucketed per day.
async fn get_week(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<WeekResponse>> {
    let date = NaiveDate::parse_from_str(&params.start, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Invalid 'start' parameter: must be YYYY-MM-DD".to_string())
    })?;

    let monday = calendar::week_start(date);
    let activities = state.db.list_activities(None).await?;

    let days = calendar::bucket_week(monday, &activities)
        .into_iter()
        .map(|day| WeekDaySummary {
            date: day.date.to_string(),
            activities: day
                .activities
                .into_iter()
                .map(ActivitySummary::from)
                .collect(),
        })
        .collect();

    Ok(Json(WeekResponse {
        week_start: monday.to_string(),
        iso_week: calendar::iso_week_number(monday),
        days,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_duration_accepts_both_shapes() {
        assert_eq!(
            resolve_duration(Some(&DurationInput::Seconds(1500.0))).unwrap(),
            1500
        );
        assert_eq!(
            resolve_duration(Some(&DurationInput::Clock("25:00".to_string()))).unwrap(),
            1500
        );
        assert_eq!(
            resolve_duration(Some(&DurationInput::Clock("1:05:00".to_string()))).unwrap(),
            3900
        );
    }

    #[test]
    fn test_resolve_duration_rejects_bad_input() {
        assert!(resolve_duration(None).is_err());
        assert!(resolve_duration(Some(&DurationInput::Seconds(0.0))).is_err());
        assert!(resolve_duration(Some(&DurationInput::Seconds(-5.0))).is_err());
        assert!(resolve_duration(Some(&DurationInput::Seconds(f64::NAN))).is_err());
        assert!(resolve_duration(Some(&DurationInput::Clock("abc".to_string()))).is_err());
        // Blank string is "missing", not "malformed"
        let err = resolve_duration(Some(&DurationInput::Clock("  ".to_string()))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("required")));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(None, 10, "Title").unwrap(), None);
        assert_eq!(clean_text(Some("  ".to_string()), 10, "Title").unwrap(), None);
        assert_eq!(
            clean_text(Some(" ok ".to_string()), 10, "Title").unwrap(),
            Some("ok".to_string())
        );
        assert!(clean_text(Some("x".repeat(11)), 10, "Title").is_err());
    }
}
