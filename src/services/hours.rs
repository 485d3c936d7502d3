// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly worked-hours projection.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Employee, Shift};
use crate::time_utils::month_prefix;

/// One employee's totals for a month.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeHours {
    pub employee_id: String,
    pub name: String,
    /// Total worked minutes
    pub minutes: u32,
    /// Minutes / 60 rounded to one decimal place
    pub hours: f64,
}

/// Sum worked minutes per employee over a month. `month` is 0-indexed.
///
/// Admin employees and day-off records never count. Records with a
/// missing start or end minute, or an end at or before the start, are
/// skipped individually - one malformed record must not poison another
/// employee's total. Shifts whose employee id no longer resolves to a
/// known employee are dropped with the same shrug.
///
/// Rows are ordered by display name (case-insensitive), ties by id.
pub fn compute_monthly_hours(
    year: i32,
    month: u32,
    shifts: &[Shift],
    employees: &[Employee],
) -> Vec<EmployeeHours> {
    let prefix = month_prefix(year, month);
    let mut minutes_by_employee: HashMap<&str, u32> = HashMap::new();

    for shift in shifts {
        if !shift.date.starts_with(&prefix) || !shift.shift_type.is_working() {
            continue;
        }
        let (Some(start), Some(end)) = (shift.start_minute, shift.end_minute) else {
            continue;
        };
        let Some(span) = end.checked_sub(start).filter(|s| *s > 0) else {
            continue;
        };
        *minutes_by_employee
            .entry(shift.employee_id.as_str())
            .or_insert(0) += span;
    }

    let mut rows: Vec<EmployeeHours> = employees
        .iter()
        .filter(|e| !e.is_admin())
        .map(|employee| {
            let minutes = minutes_by_employee
                .get(employee.id.as_str())
                .copied()
                .unwrap_or(0);
            EmployeeHours {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                minutes,
                hours: (minutes as f64 / 60.0 * 10.0).round() / 10.0,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    rows
}
