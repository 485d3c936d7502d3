// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auto-fill engine tests.
//!
//! The engine takes the randomness source as a parameter, so every test
//! here pins selection with a seeded generator and stays deterministic.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use shift_roster::models::{
    AvailabilityMode, AvailabilityRecord, Employee, Role, Shift, ShiftType, Slot,
};
use shift_roster::services::autofill::{auto_fill, STAFFING_TARGET};
use shift_roster::time_utils::{days_in_month, format_date};

const NOW: &str = "2024-06-01T00:00:00Z";
const YEAR: i32 = 2024;
const MONTH: u32 = 5; // June (0-indexed)

fn employee(id: &str, role: Role) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        role,
        color_index: 0,
        pin: "000000".to_string(),
        created_at: NOW.to_string(),
    }
}

fn staff(ids: &[&str]) -> Vec<Employee> {
    let mut employees: Vec<Employee> =
        ids.iter().map(|id| employee(id, Role::User)).collect();
    employees.push(employee("admin", Role::Admin));
    employees
}

fn avail_map(records: Vec<AvailabilityRecord>) -> HashMap<String, AvailabilityRecord> {
    records.into_iter().map(|r| (r.id.clone(), r)).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Count shifts of one type on one date.
fn count_on(shifts: &[Shift], date: &str, shift_type: ShiftType) -> usize {
    shifts
        .iter()
        .filter(|s| s.date == date && s.shift_type == shift_type)
        .count()
}

#[test]
fn test_never_exceeds_staffing_target() {
    // Plenty of candidates, a partially staffed month: after the fill,
    // no (day, type) may exceed the target.
    let employees = staff(&["u1", "u2", "u3", "u4", "u5"]);
    let mut month_shifts = vec![
        Shift::new(&format_date(YEAR, MONTH, 3), "u1", ShiftType::Morning, NOW),
        Shift::new(&format_date(YEAR, MONTH, 3), "u2", ShiftType::Morning, NOW),
        Shift::new(&format_date(YEAR, MONTH, 7), "u1", ShiftType::Evening, NOW),
    ];

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &month_shifts,
        &HashMap::new(),
        NOW,
        &mut rng(),
    );
    month_shifts.extend(ws.upserts);

    for day in 1..=days_in_month(YEAR, MONTH) {
        let date = format_date(YEAR, MONTH, day);
        assert!(count_on(&month_shifts, &date, ShiftType::Morning) <= STAFFING_TARGET);
        assert!(count_on(&month_shifts, &date, ShiftType::Evening) <= STAFFING_TARGET);
    }

    // Day 3 already met the morning target, so it gained nothing there
    let day3 = format_date(YEAR, MONTH, 3);
    assert_eq!(count_on(&month_shifts, &day3, ShiftType::Morning), 2);
}

#[test]
fn test_selects_exactly_needed_from_larger_pool() {
    // Scenario: 3 eligible for morning, target 2 - exactly 2 are picked
    let employees = staff(&["u1", "u2", "u3"]);
    let date = format_date(YEAR, MONTH, 1);

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &HashMap::new(),
        NOW,
        &mut rng(),
    );

    let morning: Vec<_> = ws
        .upserts
        .iter()
        .filter(|s| s.date == date && s.shift_type == ShiftType::Morning)
        .collect();
    assert_eq!(morning.len(), 2);

    // No employee appears twice in the same (day, type)
    let mut ids: Vec<&str> = morning.iter().map(|s| s.employee_id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 2);
}

#[test]
fn test_small_pool_is_taken_whole() {
    let employees = staff(&["u1"]);
    let date = format_date(YEAR, MONTH, 1);

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &HashMap::new(),
        NOW,
        &mut rng(),
    );

    assert_eq!(count_on(&ws.upserts, &date, ShiftType::Morning), 1);
    assert_eq!(count_on(&ws.upserts, &date, ShiftType::Evening), 1);
}

#[test]
fn test_admins_are_never_scheduled() {
    let employees = staff(&["u1", "u2"]);

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &HashMap::new(),
        NOW,
        &mut rng(),
    );

    assert!(ws.upserts.iter().all(|s| s.employee_id != "admin"));
}

#[test]
fn test_existing_shift_excludes_from_both_pools() {
    // u1 already works the morning of day 1: not picked again that day,
    // not even for the evening.
    let employees = staff(&["u1", "u2"]);
    let date = format_date(YEAR, MONTH, 1);
    let month_shifts = vec![Shift::new(&date, "u1", ShiftType::Morning, NOW)];

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &month_shifts,
        &HashMap::new(),
        NOW,
        &mut rng(),
    );

    assert!(!ws
        .upserts
        .iter()
        .any(|s| s.date == date && s.employee_id == "u1"));
}

#[test]
fn test_day_off_excludes_from_both_pools() {
    let employees = staff(&["u1", "u2"]);
    let date = format_date(YEAR, MONTH, 1);
    let month_shifts = vec![Shift::new(&date, "u1", ShiftType::Off, NOW)];

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &month_shifts,
        &HashMap::new(),
        NOW,
        &mut rng(),
    );

    assert!(!ws
        .upserts
        .iter()
        .any(|s| s.date == date && s.employee_id == "u1"));
}

#[test]
fn test_availability_restricts_pools() {
    let employees = staff(&["u1", "u2", "u3"]);
    let date = format_date(YEAR, MONTH, 1);
    let availability = avail_map(vec![
        // u1 offers morning only
        AvailabilityRecord::new(&date, "u1", AvailabilityMode::Normal, vec![Slot::Morning], NOW),
        // u2 is out for the day
        AvailabilityRecord::new(&date, "u2", AvailabilityMode::FullUnavailable, vec![], NOW),
    ]);

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &availability,
        NOW,
        &mut rng(),
    );

    let on = |employee_id: &str, shift_type: ShiftType| {
        ws.upserts
            .iter()
            .any(|s| s.date == date && s.employee_id == employee_id && s.shift_type == shift_type)
    };

    assert!(!on("u2", ShiftType::Morning));
    assert!(!on("u2", ShiftType::Evening));
    assert!(!on("u1", ShiftType::Evening));
    // Morning pool was {u1, u3}, both needed to reach the target
    assert!(on("u1", ShiftType::Morning));
    assert!(on("u3", ShiftType::Morning));
    // Evening pool was {u3} alone
    assert!(on("u3", ShiftType::Evening));
}

#[test]
fn test_employee_may_take_both_shifts_same_day() {
    // A lone full-available employee covers morning and evening alike
    let employees = staff(&["u1"]);
    let date = format_date(YEAR, MONTH, 1);
    let availability = avail_map(vec![AvailabilityRecord::new(
        &date,
        "u1",
        AvailabilityMode::FullAvailable,
        vec![],
        NOW,
    )]);

    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &availability,
        NOW,
        &mut rng(),
    );

    assert!(ws
        .upserts
        .iter()
        .any(|s| s.date == date && s.employee_id == "u1" && s.shift_type == ShiftType::Morning));
    assert!(ws
        .upserts
        .iter()
        .any(|s| s.date == date && s.employee_id == "u1" && s.shift_type == ShiftType::Evening));
}

#[test]
fn test_rerun_on_full_month_writes_nothing() {
    // Fill once, feed the result back in: the second run is a no-op
    let employees = staff(&["u1", "u2", "u3", "u4"]);

    let first = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &HashMap::new(),
        NOW,
        &mut rng(),
    );
    assert!(!first.upserts.is_empty());

    let second = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &first.upserts,
        &HashMap::new(),
        NOW,
        &mut StdRng::seed_from_u64(7),
    );
    assert!(second.upserts.is_empty());
}

#[test]
fn test_fill_only_inserts() {
    let employees = staff(&["u1", "u2"]);
    let ws = auto_fill(
        YEAR,
        MONTH,
        &employees,
        &[],
        &HashMap::new(),
        NOW,
        &mut rng(),
    );
    assert!(ws.deletes.is_empty());
}
