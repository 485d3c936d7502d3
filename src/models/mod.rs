// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod availability;
pub mod employee;
pub mod settings;
pub mod shift;

pub use availability::{availability_doc_id, AvailabilityMode, AvailabilityRecord, Slot};
pub use employee::{Employee, Role};
pub use settings::Settings;
pub use shift::{shift_doc_id, Shift, ShiftType, ShiftTypeDef};
