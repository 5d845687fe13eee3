// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Duration parsing and formatting.
//!
//! All durations converge on whole seconds. Three input shapes are
//! accepted: plain seconds ("1500"), "MM:SS", and "H:MM:SS". Blank
//! input is a neutral "no value", not a parse error, so the form can
//! distinguish "field left empty" from "show validation message".

/// Display output for values that cannot be computed.
pub const SENTINEL: &str = "–";

/// A non-empty duration string that matches none of the accepted shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duration must be seconds, \"MM:SS\" or \"H:MM:SS\"")]
pub struct InvalidDuration;

/// Parse a duration string into whole seconds.
///
/// Returns `Ok(None)` for blank input and `Err(InvalidDuration)` for
/// anything that is not plain seconds, "MM:SS" or "H:MM:SS".
/// Minutes and seconds fields are bounded to 0–59; hours are not.
pub fn parse_duration(input: &str) -> Result<Option<u32>, InvalidDuration> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = input.split(':').collect();
    let seconds = match parts.as_slice() {
        [secs] => parse_field(secs, None)?,
        [mins, secs] => parse_field(mins, Some(59))? * 60 + parse_field(secs, Some(59))?,
        [hours, mins, secs] => parse_field(hours, None)?
            .checked_mul(3600)
            .ok_or(InvalidDuration)?
            .checked_add(parse_field(mins, Some(59))? * 60 + parse_field(secs, Some(59))?)
            .ok_or(InvalidDuration)?,
        _ => return Err(InvalidDuration),
    };

    Ok(Some(seconds))
}

/// Parse one numeric field. Bounded fields ("MM"/"SS") allow at most
/// two digits and a maximum value of 59.
fn parse_field(field: &str, max: Option<u32>) -> Result<u32, InvalidDuration> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidDuration);
    }
    if max.is_some() && field.len() > 2 {
        return Err(InvalidDuration);
    }

    let value: u32 = field.parse().map_err(|_| InvalidDuration)?;
    match max {
        Some(max) if value > max => Err(InvalidDuration),
        _ => Ok(value),
    }
}

/// Format a second count as "M:SS" (under an hour) or "H:MM:SS".
///
/// Negative input renders the sentinel; this function never panics.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds < 0 {
        return SENTINEL.to_string();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
