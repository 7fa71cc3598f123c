// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable time formatting for reports and status output.

use chrono::{DateTime, Utc};

/// Format an elapsed duration in milliseconds as "2h 5m 3s".
///
/// Sub-minute durations render as "42s", sub-hour as "5m 3s".
pub fn format_elapsed_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Format an epoch-milliseconds timestamp as "2021-05-03 00:00:00" (UTC).
pub fn format_timestamp_ms(ms: u64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms as i64) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "invalid".to_string(),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
