// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The sport an activity was recorded for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Run,
    Cycle,
    Swim,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Run, Sport::Cycle, Sport::Swim];

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Run => "run",
            Sport::Cycle => "cycle",
            Sport::Swim => "swim",
        }
    }

    /// Parse a sport name case-insensitively. Unknown names are a
    /// caller error, signalled as `None`.
    pub fn parse(name: &str) -> Option<Sport> {
        match name.trim().to_ascii_lowercase().as_str() {
            "run" => Some(Sport::Run),
            "cycle" => Some(Sport::Cycle),
            "swim" => Some(Sport::Swim),
            _ => None,
        }
    }
}

/// Stored activity record.
///
/// Distances are always kilometers (a swim entered in meters is
/// divided by 1000 before it reaches this type) and durations are
/// canonical whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Document ID (UUIDv4)
    pub id: String,
    /// Which sport was practiced
    pub sport: Sport,
    /// Distance in kilometers, always positive
    pub distance_km: f64,
    /// Duration in whole seconds, always positive
    pub duration_s: u32,
    /// When the activity took place
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    /// Optional short title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional free-text comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
