// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shift-Roster: monthly shift scheduling for a small storefront team
//!
//! This crate provides the backend API for assigning morning/evening
//! shifts on a monthly calendar, collecting per-day availability from
//! employees, auto-filling open slots against staffing targets, and
//! reporting worked hours.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
