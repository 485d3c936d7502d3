use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use shift_roster::models::{
    AvailabilityMode, AvailabilityRecord, Employee, Role, Shift, ShiftType,
};
use shift_roster::services::autofill::auto_fill;
use shift_roster::time_utils::{days_in_month, format_date};

const NOW: &str = "2024-06-01T00:00:00Z";

fn roster(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee {
            id: format!("u{}", i),
            name: format!("Employee {}", i),
            role: Role::User,
            color_index: (i % 7) as u32,
            pin: "000000".to_string(),
            created_at: NOW.to_string(),
        })
        .collect()
}

fn benchmark_auto_fill(c: &mut Criterion) {
    let (year, month) = (2024, 5);
    let employees = roster(25);

    // Empty month: every day needs both shift types filled
    let empty_shifts: Vec<Shift> = Vec::new();
    let no_availability: HashMap<String, AvailabilityRecord> = HashMap::new();

    // Busy month: half the days already staffed, everyone restricted
    let mut busy_shifts = Vec::new();
    for day in 1..=days_in_month(year, month) {
        if day % 2 == 0 {
            let date = format_date(year, month, day);
            busy_shifts.push(Shift::new(&date, "u0", ShiftType::Morning, NOW));
            busy_shifts.push(Shift::new(&date, "u1", ShiftType::Morning, NOW));
            busy_shifts.push(Shift::new(&date, "u2", ShiftType::Evening, NOW));
        }
    }
    let mut restricted = HashMap::new();
    for day in 1..=days_in_month(year, month) {
        let date = format_date(year, month, day);
        for employee in employees.iter().take(10) {
            let record = AvailabilityRecord::new(
                &date,
                &employee.id,
                AvailabilityMode::Normal,
                vec![shift_roster::models::Slot::Morning],
                NOW,
            );
            restricted.insert(record.id.clone(), record);
        }
    }

    let mut group = c.benchmark_group("auto_fill");

    group.bench_function("empty_month_25_employees", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            auto_fill(
                year,
                month,
                black_box(&employees),
                black_box(&empty_shifts),
                black_box(&no_availability),
                NOW,
                &mut rng,
            )
        })
    });

    group.bench_function("half_staffed_restricted_month", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            auto_fill(
                year,
                month,
                black_box(&employees),
                black_box(&busy_shifts),
                black_box(&restricted),
                NOW,
                &mut rng,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_auto_fill);
criterion_main!(benches);
