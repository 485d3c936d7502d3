// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the scheduling engines.
//!
//! Everything here is pure: engines read an in-memory snapshot of the
//! month and return a write-set; only the caller talks to storage.

pub mod assignment;
pub mod autofill;
pub mod eligibility;
pub mod hours;

pub use assignment::{AssignOutcome, WriteSet};
pub use autofill::STAFFING_TARGET;
pub use eligibility::DenialReason;
pub use hours::EmployeeHours;
