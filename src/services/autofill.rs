// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch auto-fill engine: randomized bounded month fill.
//!
//! For every day of the target month, builds the pool of employees
//! eligible for each working shift type and tops the day up to the
//! staffing target by uniform sampling without replacement. The whole
//! month accumulates into one write-set so a storage failure leaves
//! either a fully filled month or an untouched one; a partially landed
//! fill would double-assign past the target on re-run.
//!
//! Selection is not reproducible across runs. Re-running on a month
//! that already meets its targets writes nothing.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{
    availability_doc_id, AvailabilityMode, AvailabilityRecord, Employee, Shift, ShiftType, Slot,
};
use crate::services::assignment::WriteSet;
use crate::time_utils::{days_in_month, format_date};

/// Fixed staffing target per working shift type per day.
pub const STAFFING_TARGET: usize = 2;

/// Fill every unmet (day, shift type) slot in the month.
///
/// `month_shifts` is the month's current shift snapshot; `availability`
/// is keyed by availability document id. `month` is 0-indexed. The
/// caller supplies the randomness source, which is what lets tests pin
/// the selection with a seeded generator.
pub fn auto_fill<R: Rng + ?Sized>(
    year: i32,
    month: u32,
    employees: &[Employee],
    month_shifts: &[Shift],
    availability: &HashMap<String, AvailabilityRecord>,
    now: &str,
    rng: &mut R,
) -> WriteSet {
    let mut write_set = WriteSet::default();

    for day in 1..=days_in_month(year, month) {
        let date = format_date(year, month, day);
        let day_shifts: Vec<&Shift> = month_shifts.iter().filter(|s| s.date == date).collect();

        let mut morning_pool: Vec<&Employee> = Vec::new();
        let mut evening_pool: Vec<&Employee> = Vec::new();

        for employee in employees.iter().filter(|e| !e.is_admin()) {
            // Any existing shift that day excludes the employee from both
            // pools; a day off is just the O record of that rule.
            if day_shifts.iter().any(|s| s.employee_id == employee.id) {
                continue;
            }

            let record = availability.get(&availability_doc_id(&date, &employee.id));
            if record.is_some_and(|r| r.mode == AvailabilityMode::FullUnavailable) {
                continue;
            }

            let restricted = record.is_some_and(|r| r.mode == AvailabilityMode::Normal);
            let offered = |slot: Slot| {
                !restricted || record.is_some_and(|r| r.slots.contains(&slot))
            };

            if offered(Slot::Morning) {
                morning_pool.push(employee);
            }
            if offered(Slot::Evening) {
                evening_pool.push(employee);
            }
        }

        fill_shift_type(
            &date,
            ShiftType::Morning,
            &day_shifts,
            morning_pool,
            now,
            rng,
            &mut write_set,
        );
        fill_shift_type(
            &date,
            ShiftType::Evening,
            &day_shifts,
            evening_pool,
            now,
            rng,
            &mut write_set,
        );
    }

    write_set
}

/// Top one (day, shift type) up to the staffing target from its pool.
fn fill_shift_type<R: Rng + ?Sized>(
    date: &str,
    shift_type: ShiftType,
    day_shifts: &[&Shift],
    pool: Vec<&Employee>,
    now: &str,
    rng: &mut R,
    write_set: &mut WriteSet,
) {
    let assigned = day_shifts
        .iter()
        .filter(|s| s.shift_type == shift_type)
        .count();
    if assigned >= STAFFING_TARGET || pool.is_empty() {
        return;
    }

    let needed = STAFFING_TARGET - assigned;
    let selected: Vec<&Employee> = if pool.len() > needed {
        pool.choose_multiple(rng, needed).copied().collect()
    } else {
        pool
    };

    for employee in selected {
        write_set
            .upserts
            .push(Shift::new(date, &employee.id, shift_type, now));
    }
}
