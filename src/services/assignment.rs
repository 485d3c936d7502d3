// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shift assignment engine: the single-cell toggle protocol.
//!
//! Assigning is not an upsert. Requesting a type the employee already
//! holds removes it; requesting a day off displaces every working shift
//! on that date. Each call produces one write-set that the caller must
//! commit atomically - applying it partially would break the
//! off/working mutual exclusion.

use crate::models::{shift_doc_id, AvailabilityRecord, Shift, ShiftType};
use crate::services::eligibility::{can_assign, DenialReason};

/// A group of shift upserts and deletions committed as one atomic unit.
#[derive(Debug, Clone, Default)]
pub struct WriteSet {
    pub upserts: Vec<Shift>,
    /// Shift document ids to delete
    pub deletes: Vec<String>,
}

impl WriteSet {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }

    /// Total number of write operations.
    pub fn len(&self) -> usize {
        self.upserts.len() + self.deletes.len()
    }
}

/// Outcome of an assignment request.
#[derive(Debug)]
pub enum AssignOutcome {
    /// The toggle produced writes to commit
    Applied(WriteSet),
    /// Refused by the availability evaluator; nothing to write
    Denied(DenialReason),
}

/// Apply the toggle protocol for one (date, employee, shift type) request.
///
/// `employee_shifts` must be the employee's existing shift records on
/// `date` (records for other employees or dates are the caller's bug).
pub fn assign(
    date: &str,
    employee_id: &str,
    shift_type: ShiftType,
    employee_shifts: &[Shift],
    availability: Option<&AvailabilityRecord>,
    now: &str,
) -> AssignOutcome {
    if shift_type == ShiftType::Off {
        return AssignOutcome::Applied(toggle_off(date, employee_id, employee_shifts, now));
    }

    if let Err(reason) = can_assign(shift_type, employee_shifts, availability) {
        return AssignOutcome::Denied(reason);
    }

    let id = shift_doc_id(date, employee_id, shift_type);
    let mut write_set = WriteSet::default();
    if employee_shifts.iter().any(|s| s.id == id) {
        write_set.deletes.push(id);
    } else {
        write_set
            .upserts
            .push(Shift::new(date, employee_id, shift_type, now));
    }
    AssignOutcome::Applied(write_set)
}

/// Toggle a day off. Granting one deletes every working shift for the
/// date; requesting one that already exists removes it instead.
fn toggle_off(date: &str, employee_id: &str, employee_shifts: &[Shift], now: &str) -> WriteSet {
    let off_id = shift_doc_id(date, employee_id, ShiftType::Off);
    let mut write_set = WriteSet::default();

    if employee_shifts.iter().any(|s| s.id == off_id) {
        write_set.deletes.push(off_id);
        return write_set;
    }

    write_set.deletes.extend(
        employee_shifts
            .iter()
            .filter(|s| s.shift_type.is_working())
            .map(|s| s.id.clone()),
    );
    write_set
        .upserts
        .push(Shift::new(date, employee_id, ShiftType::Off, now));
    write_set
}

/// Remove every shift record for (date, employee) regardless of type.
/// Used for bulk corrections.
pub fn clear_day(employee_shifts: &[Shift]) -> WriteSet {
    WriteSet {
        upserts: Vec::new(),
        deletes: employee_shifts.iter().map(|s| s.id.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityMode, Slot};

    const NOW: &str = "2024-06-01T00:00:00Z";

    #[test]
    fn test_assign_inserts_with_static_window() {
        let AssignOutcome::Applied(ws) =
            assign("2024-06-10", "u1", ShiftType::Morning, &[], None, NOW)
        else {
            panic!("expected applied");
        };
        assert_eq!(ws.deletes.len(), 0);
        assert_eq!(ws.upserts.len(), 1);
        assert_eq!(ws.upserts[0].start_minute, Some(600));
        assert_eq!(ws.upserts[0].end_minute, Some(840));
    }

    #[test]
    fn test_assign_existing_type_toggles_off() {
        let existing = vec![Shift::new("2024-06-10", "u1", ShiftType::Morning, NOW)];
        let AssignOutcome::Applied(ws) =
            assign("2024-06-10", "u1", ShiftType::Morning, &existing, None, NOW)
        else {
            panic!("expected applied");
        };
        assert!(ws.upserts.is_empty());
        assert_eq!(ws.deletes, vec!["2024-06-10_u1_M".to_string()]);
    }

    #[test]
    fn test_off_displaces_working_shifts() {
        let existing = vec![
            Shift::new("2024-06-10", "u1", ShiftType::Morning, NOW),
            Shift::new("2024-06-10", "u1", ShiftType::Evening, NOW),
        ];
        let AssignOutcome::Applied(ws) =
            assign("2024-06-10", "u1", ShiftType::Off, &existing, None, NOW)
        else {
            panic!("expected applied");
        };
        assert_eq!(ws.deletes.len(), 2);
        assert_eq!(ws.upserts.len(), 1);
        assert_eq!(ws.upserts[0].shift_type, ShiftType::Off);
    }

    #[test]
    fn test_off_toggles_back_off() {
        let existing = vec![Shift::new("2024-06-10", "u1", ShiftType::Off, NOW)];
        let AssignOutcome::Applied(ws) =
            assign("2024-06-10", "u1", ShiftType::Off, &existing, None, NOW)
        else {
            panic!("expected applied");
        };
        assert!(ws.upserts.is_empty());
        assert_eq!(ws.deletes, vec!["2024-06-10_u1_O".to_string()]);
    }

    #[test]
    fn test_denial_produces_no_writes() {
        let record = AvailabilityRecord::new(
            "2024-06-10",
            "u1",
            AvailabilityMode::Normal,
            vec![Slot::Morning],
            NOW,
        );
        let outcome = assign(
            "2024-06-10",
            "u1",
            ShiftType::Evening,
            &[],
            Some(&record),
            NOW,
        );
        let AssignOutcome::Denied(reason) = outcome else {
            panic!("expected denial");
        };
        assert_eq!(reason, DenialReason::SlotNotOffered);
    }

    #[test]
    fn test_clear_day_deletes_everything() {
        let existing = vec![
            Shift::new("2024-06-10", "u1", ShiftType::Morning, NOW),
            Shift::new("2024-06-10", "u1", ShiftType::Off, NOW),
        ];
        let ws = clear_day(&existing);
        assert!(ws.upserts.is_empty());
        assert_eq!(ws.deletes.len(), 2);
    }
}
