// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-day availability submitted by employees.

use serde::{Deserialize, Serialize};

/// Availability-side time slot, mapped 1:1 to the working shift types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Evening,
}

/// How an employee declared their day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    /// Only the listed `slots` are offered
    Normal,
    /// Any slot is fine
    FullAvailable,
    /// The whole day is off-limits
    FullUnavailable,
}

/// One employee's self-declared availability for one date.
///
/// Absence of a record means no constraint was declared: the employee
/// counts as available for every slot. Last write wins; there is no
/// history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Document ID: `date_employeeId`
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub employee_id: String,
    pub mode: AvailabilityMode,
    /// Offered slots; only meaningful when `mode` is `Normal`
    #[serde(default)]
    pub slots: Vec<Slot>,
    /// Last write timestamp (RFC3339)
    pub updated_at: String,
}

/// Deterministic availability document id for one (date, employee) pair.
pub fn availability_doc_id(date: &str, employee_id: &str) -> String {
    format!("{}_{}", date, employee_id)
}

impl AvailabilityRecord {
    pub fn new(
        date: &str,
        employee_id: &str,
        mode: AvailabilityMode,
        slots: Vec<Slot>,
        now: &str,
    ) -> Self {
        Self {
            id: availability_doc_id(date, employee_id),
            date: date.to_string(),
            employee_id: employee_id.to_string(),
            mode,
            slots,
            updated_at: now.to_string(),
        }
    }
}
