// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Availability evaluator: decides whether a shift may be assigned.
//!
//! Consulted by both the single-cell assignment engine and the batch
//! auto-fill engine so that the two paths can never disagree on
//! eligibility.

use serde::Serialize;

use crate::models::{AvailabilityMode, AvailabilityRecord, Shift, ShiftType};

/// Why an assignment was refused.
///
/// A denial is a business outcome surfaced to the caller, not a fault;
/// it never becomes an `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The employee already has a day off on this date
    AlreadyOff,
    /// The employee marked the whole day unavailable
    FullyUnavailable,
    /// The employee's submission does not offer this shift's slot
    SlotNotOffered,
}

impl DenialReason {
    /// Short user-facing explanation for API responses.
    pub fn message(self) -> &'static str {
        match self {
            DenialReason::AlreadyOff => "employee already has a day off on this date",
            DenialReason::FullyUnavailable => "employee is unavailable for the whole day",
            DenialReason::SlotNotOffered => "employee did not offer this time slot",
        }
    }
}

/// Decide whether `shift_type` may be assigned to an employee on a date.
///
/// `employee_shifts` are the employee's existing shift records for that
/// date; `availability` is their submission for the date, if any. No
/// record means no constraint was declared, so the employee counts as
/// available for every slot.
///
/// Day-off requests always pass: removing or granting a day off is the
/// toggle protocol's business, not an eligibility question.
pub fn can_assign(
    shift_type: ShiftType,
    employee_shifts: &[Shift],
    availability: Option<&AvailabilityRecord>,
) -> Result<(), DenialReason> {
    let Some(slot) = shift_type.slot() else {
        return Ok(());
    };

    if employee_shifts
        .iter()
        .any(|s| s.shift_type == ShiftType::Off)
    {
        return Err(DenialReason::AlreadyOff);
    }

    match availability {
        Some(record) if record.mode == AvailabilityMode::FullUnavailable => {
            Err(DenialReason::FullyUnavailable)
        }
        Some(record)
            if record.mode == AvailabilityMode::Normal && !record.slots.contains(&slot) =>
        {
            Err(DenialReason::SlotNotOffered)
        }
        _ => Ok(()),
    }
}
