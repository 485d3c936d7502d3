// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide settings: the availability submission window.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Singleton configuration record gating when employees may submit
/// availability. Mutated only by admins; read by everyone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Window start, local wall-clock (`YYYY-MM-DDTHH:MM` or RFC3339)
    pub open_start: String,
    /// Window end, same format
    pub open_end: String,
}

impl Default for Settings {
    /// Wide-open window used until an admin narrows it.
    fn default() -> Self {
        Self {
            open_start: "2023-01-01T00:00".to_string(),
            open_end: "2030-12-31T23:59".to_string(),
        }
    }
}

impl Settings {
    /// Whether employees may submit availability at `now`.
    ///
    /// A bound that fails to parse closes the window rather than opening
    /// it wide.
    pub fn submission_open(&self, now: NaiveDateTime) -> bool {
        match (parse_local(&self.open_start), parse_local(&self.open_end)) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|d| d.naive_local())
        })
}
