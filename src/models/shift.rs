// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shift records and the static shift-type table.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::availability::Slot;
use crate::time_utils::{format_minutes, minutes_of_day};

/// Daily work category. Wire form is the single-letter code used as the
/// last segment of shift document ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "E")]
    Evening,
    #[serde(rename = "O")]
    Off,
}

impl ShiftType {
    pub fn code(self) -> &'static str {
        match self {
            ShiftType::Morning => "M",
            ShiftType::Evening => "E",
            ShiftType::Off => "O",
        }
    }

    pub fn is_working(self) -> bool {
        !matches!(self, ShiftType::Off)
    }

    /// The availability slot an employee must offer for this shift type.
    /// Days off have no slot.
    pub fn slot(self) -> Option<Slot> {
        match self {
            ShiftType::Morning => Some(Slot::Morning),
            ShiftType::Evening => Some(Slot::Evening),
            ShiftType::Off => None,
        }
    }

    /// Static configuration for this shift type.
    pub fn def(self) -> &'static ShiftTypeDef {
        match self {
            ShiftType::Morning => &SHIFT_TYPES[0],
            ShiftType::Evening => &SHIFT_TYPES[1],
            ShiftType::Off => &SHIFT_TYPES[2],
        }
    }
}

/// Static configuration for one shift type. Not persisted; shift records
/// copy the start/end minutes at assignment time.
#[derive(Debug, Clone)]
pub struct ShiftTypeDef {
    pub shift_type: ShiftType,
    /// Minutes since midnight; `None` for days off
    pub start_minute: Option<u32>,
    pub end_minute: Option<u32>,
}

impl ShiftTypeDef {
    /// `HH:MM-HH:MM` window label for working types, `None` for days off.
    pub fn window_label(&self) -> Option<String> {
        match (self.start_minute, self.end_minute) {
            (Some(start), Some(end)) => {
                Some(format!("{}-{}", format_minutes(start), format_minutes(end)))
            }
            _ => None,
        }
    }
}

/// Fixed shift-type table: morning 10:00-14:00, evening 17:30-21:30, off.
pub static SHIFT_TYPES: LazyLock<[ShiftTypeDef; 3]> = LazyLock::new(|| {
    [
        ShiftTypeDef {
            shift_type: ShiftType::Morning,
            start_minute: Some(minutes_of_day("10:00")),
            end_minute: Some(minutes_of_day("14:00")),
        },
        ShiftTypeDef {
            shift_type: ShiftType::Evening,
            start_minute: Some(minutes_of_day("17:30")),
            end_minute: Some(minutes_of_day("21:30")),
        },
        ShiftTypeDef {
            shift_type: ShiftType::Off,
            start_minute: None,
            end_minute: None,
        },
    ]
});

/// Shift record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Document ID: `date_employeeId_type`. Deterministic ids turn
    /// assignment into set membership, which is what makes the toggle
    /// protocol idempotent.
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    /// Copied from the static table; `None` only for days off
    pub start_minute: Option<u32>,
    pub end_minute: Option<u32>,
    /// Last write timestamp (RFC3339)
    pub updated_at: String,
}

/// Deterministic shift document id for one (date, employee, type) cell.
pub fn shift_doc_id(date: &str, employee_id: &str, shift_type: ShiftType) -> String {
    format!("{}_{}_{}", date, employee_id, shift_type.code())
}

impl Shift {
    /// Build a new record with the static window for its type.
    pub fn new(date: &str, employee_id: &str, shift_type: ShiftType, now: &str) -> Self {
        let def = shift_type.def();
        Self {
            id: shift_doc_id(date, employee_id, shift_type),
            date: date.to_string(),
            employee_id: employee_id.to_string(),
            shift_type,
            start_minute: def.start_minute,
            end_minute: def.end_minute,
            updated_at: now.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_type_table() {
        assert_eq!(ShiftType::Morning.def().start_minute, Some(600));
        assert_eq!(ShiftType::Morning.def().end_minute, Some(840));
        assert_eq!(ShiftType::Evening.def().start_minute, Some(1050));
        assert_eq!(ShiftType::Evening.def().end_minute, Some(1290));
        assert_eq!(ShiftType::Off.def().start_minute, None);
        assert_eq!(ShiftType::Off.def().end_minute, None);
    }

    #[test]
    fn test_window_labels() {
        assert_eq!(
            ShiftType::Morning.def().window_label().as_deref(),
            Some("10:00-14:00")
        );
        assert_eq!(
            ShiftType::Evening.def().window_label().as_deref(),
            Some("17:30-21:30")
        );
        assert_eq!(ShiftType::Off.def().window_label(), None);
    }

    #[test]
    fn test_doc_id_is_deterministic() {
        assert_eq!(
            shift_doc_id("2024-06-10", "u1", ShiftType::Morning),
            "2024-06-10_u1_M"
        );
        let shift = Shift::new("2024-06-10", "u1", ShiftType::Off, "2024-06-01T00:00:00Z");
        assert_eq!(shift.id, "2024-06-10_u1_O");
        assert_eq!(shift.start_minute, None);
    }

    #[test]
    fn test_wire_codes() {
        let json = serde_json::to_string(&ShiftType::Morning).unwrap();
        assert_eq!(json, "\"M\"");
        let parsed: ShiftType = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(parsed, ShiftType::Off);
    }
}
