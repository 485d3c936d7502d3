// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated employees.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::employee::{COLOR_COUNT, DEFAULT_PIN};
use crate::models::{
    AvailabilityMode, AvailabilityRecord, Employee, Role, Settings, Shift, ShiftType, Slot,
};
use crate::services::{assignment, autofill, hours};
use crate::time_utils::{
    days_in_month, first_weekday_of_month, format_minutes, format_utc_rfc3339,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/{id}", axum::routing::delete(delete_employee))
        .route("/api/schedule", get(get_schedule))
        .route("/api/shifts/assign", post(assign_shift))
        .route("/api/shifts/clear", post(clear_day))
        .route("/api/shifts/autofill", post(auto_fill_month))
        .route("/api/shifts/clear-month", post(clear_month))
        .route("/api/availability", post(submit_availability))
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/hours", get(get_hours))
}

/// Admin gate for mutating roster/schedule endpoints.
fn require_admin(auth: &AuthUser) -> Result<()> {
    if auth.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn validate_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", date)))
}

fn validate_month(month: u32) -> Result<()> {
    if month > 11 {
        return Err(AppError::BadRequest(format!(
            "Month must be 0-11, got {}",
            month
        )));
    }
    Ok(())
}

// ─── Employee Profiles ───────────────────────────────────────

/// Employee as exposed over the API; the PIN never leaves the server.
#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub color_index: u32,
    pub created_at: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            role: employee.role,
            color_index: employee.color_index,
            created_at: employee.created_at,
        }
    }
}

/// Get current employee profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<EmployeeResponse>> {
    let employee = state
        .db
        .get_employee(&auth.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", auth.employee_id)))?;

    Ok(Json(employee.into()))
}

/// List the whole roster.
async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EmployeeResponse>>> {
    let mut employees = state.db.list_employees().await?;
    employees.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
}

/// Add an employee to the roster (admin only).
async fn create_employee(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>> {
    require_admin(&auth)?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }

    let employee = Employee {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        role: Role::User,
        color_index: rand::rng().random_range(0..COLOR_COUNT),
        pin: DEFAULT_PIN.to_string(),
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_employee(&employee).await?;

    tracing::info!(employee_id = %employee.id, name = %employee.name, "Employee created");

    Ok(Json(employee.into()))
}

/// Remove an employee (admin only).
///
/// Shift and availability records referencing the employee are left in
/// place; every read path tolerates unresolved employee ids.
async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(employee_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    require_admin(&auth)?;

    let target = state
        .db
        .get_employee(&employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))?;

    if target.is_admin() {
        return Err(AppError::BadRequest(
            "Admin accounts cannot be deleted".to_string(),
        ));
    }

    state.db.delete_employee(&employee_id).await?;
    tracing::info!(employee_id = %employee_id, "Employee deleted");

    Ok(Json(serde_json::json!({ "success": true })))
}

// ─── Schedule View ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    /// 0-indexed (0 = January)
    pub month: u32,
}

/// Shift as rendered on the calendar grid.
#[derive(Serialize)]
pub struct ShiftView {
    pub id: String,
    pub date: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub start_minute: Option<u32>,
    pub end_minute: Option<u32>,
    /// `HH:MM-HH:MM`, absent for days off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

impl From<Shift> for ShiftView {
    fn from(shift: Shift) -> Self {
        let window = shift
            .start_minute
            .zip(shift.end_minute)
            .map(|(start, end)| format!("{}-{}", format_minutes(start), format_minutes(end)));
        Self {
            id: shift.id,
            date: shift.date,
            employee_id: shift.employee_id,
            shift_type: shift.shift_type,
            start_minute: shift.start_minute,
            end_minute: shift.end_minute,
            window,
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// 0 = Sunday
    pub first_weekday: u32,
    pub shifts: Vec<ShiftView>,
    pub availability: Vec<AvailabilityRecord>,
}

/// Month snapshot for the calendar grid.
async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ScheduleResponse>> {
    validate_month(query.month)?;

    let shifts = state.db.shifts_for_month(query.year, query.month).await?;
    let availability = state
        .db
        .availability_for_month(query.year, query.month)
        .await?;

    Ok(Json(ScheduleResponse {
        year: query.year,
        month: query.month,
        days_in_month: days_in_month(query.year, query.month),
        first_weekday: first_weekday_of_month(query.year, query.month),
        shifts: shifts.into_iter().map(Into::into).collect(),
        availability,
    }))
}

// ─── Shift Assignment ────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignRequest {
    pub date: String,
    pub employee_id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
}

#[derive(Serialize)]
pub struct AssignResponse {
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<crate::services::DenialReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Toggle one (date, employee, shift type) cell (admin only).
///
/// A denial is a 200 response with `applied: false` - it is an answer,
/// not an error.
async fn assign_shift(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<AssignResponse>> {
    require_admin(&auth)?;
    validate_date(&req.date)?;

    let day_shifts = state.db.shifts_for_date(&req.date).await?;
    let employee_shifts: Vec<Shift> = day_shifts
        .into_iter()
        .filter(|s| s.employee_id == req.employee_id)
        .collect();
    let availability = state.db.get_availability(&req.date, &req.employee_id).await?;
    let now = format_utc_rfc3339(chrono::Utc::now());

    match assignment::assign(
        &req.date,
        &req.employee_id,
        req.shift_type,
        &employee_shifts,
        availability.as_ref(),
        &now,
    ) {
        assignment::AssignOutcome::Applied(write_set) => {
            state.db.commit_write_set(&write_set).await?;
            tracing::info!(
                date = %req.date,
                employee_id = %req.employee_id,
                shift_type = req.shift_type.code(),
                writes = write_set.len(),
                "Shift toggled"
            );
            Ok(Json(AssignResponse {
                applied: true,
                denial: None,
                message: None,
            }))
        }
        assignment::AssignOutcome::Denied(reason) => {
            tracing::debug!(
                date = %req.date,
                employee_id = %req.employee_id,
                shift_type = req.shift_type.code(),
                reason = ?reason,
                "Assignment denied"
            );
            Ok(Json(AssignResponse {
                applied: false,
                denial: Some(reason),
                message: Some(reason.message().to_string()),
            }))
        }
    }
}

#[derive(Deserialize)]
pub struct ClearDayRequest {
    pub date: String,
    pub employee_id: String,
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub deleted: usize,
}

/// Remove every shift for one (date, employee) (admin only).
async fn clear_day(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ClearDayRequest>,
) -> Result<Json<ClearResponse>> {
    require_admin(&auth)?;
    validate_date(&req.date)?;

    let day_shifts = state.db.shifts_for_date(&req.date).await?;
    let employee_shifts: Vec<Shift> = day_shifts
        .into_iter()
        .filter(|s| s.employee_id == req.employee_id)
        .collect();

    let write_set = assignment::clear_day(&employee_shifts);
    let deleted = write_set.deletes.len();
    state.db.commit_write_set(&write_set).await?;

    tracing::info!(date = %req.date, employee_id = %req.employee_id, deleted, "Day cleared");

    Ok(Json(ClearResponse { deleted }))
}

// ─── Batch Auto-Fill ─────────────────────────────────────────

#[derive(Serialize)]
pub struct AutoFillResponse {
    pub inserted: usize,
}

/// Fill every understaffed day of a month (admin only).
///
/// The month snapshot is read first, the engine decides everything in
/// memory, and the resulting write-set commits in one transaction.
async fn auto_fill_month(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(query): Json<MonthQuery>,
) -> Result<Json<AutoFillResponse>> {
    require_admin(&auth)?;
    validate_month(query.month)?;

    let employees = state.db.list_employees().await?;
    let month_shifts = state.db.shifts_for_month(query.year, query.month).await?;
    let availability: HashMap<String, AvailabilityRecord> = state
        .db
        .availability_for_month(query.year, query.month)
        .await?
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();

    let now = format_utc_rfc3339(chrono::Utc::now());
    let write_set = autofill::auto_fill(
        query.year,
        query.month,
        &employees,
        &month_shifts,
        &availability,
        &now,
        &mut rand::rng(),
    );

    let inserted = write_set.upserts.len();
    state.db.commit_write_set(&write_set).await?;

    tracing::info!(
        year = query.year,
        month = query.month,
        inserted,
        "Month auto-filled"
    );

    Ok(Json(AutoFillResponse { inserted }))
}

/// Delete every shift in a month (admin only).
async fn clear_month(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(query): Json<MonthQuery>,
) -> Result<Json<ClearResponse>> {
    require_admin(&auth)?;
    validate_month(query.month)?;

    let doc_ids: Vec<String> = state
        .db
        .shifts_for_month(query.year, query.month)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    state.db.batch_delete_shifts(&doc_ids).await?;

    tracing::info!(
        year = query.year,
        month = query.month,
        deleted = doc_ids.len(),
        "Month cleared"
    );

    Ok(Json(ClearResponse {
        deleted: doc_ids.len(),
    }))
}

// ─── Availability Submission ─────────────────────────────────

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub date: String,
    pub mode: AvailabilityMode,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

/// Submit availability for one date (self-service, last write wins).
///
/// Non-admin submissions are gated by the settings window.
async fn submit_availability(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityRecord>> {
    validate_date(&req.date)?;

    if !auth.is_admin() {
        let settings = state.db.get_settings().await?.unwrap_or_default();
        if !settings.submission_open(chrono::Local::now().naive_local()) {
            return Err(AppError::BadRequest(
                "Availability submission window is closed".to_string(),
            ));
        }
    }

    let now = format_utc_rfc3339(chrono::Utc::now());
    let record = AvailabilityRecord::new(&req.date, &auth.employee_id, req.mode, req.slots, &now);
    state.db.upsert_availability(&record).await?;

    tracing::info!(
        date = %req.date,
        employee_id = %auth.employee_id,
        mode = ?req.mode,
        "Availability submitted"
    );

    Ok(Json(record))
}

// ─── Settings ────────────────────────────────────────────────

/// Read the submission window (defaults apply until an admin writes one).
async fn get_settings(State(state): State<Arc<AppState>>) -> Result<Json<Settings>> {
    Ok(Json(state.db.get_settings().await?.unwrap_or_default()))
}

/// Replace the submission window (admin only).
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>> {
    require_admin(&auth)?;

    state.db.set_settings(&settings).await?;
    tracing::info!(
        open_start = %settings.open_start,
        open_end = %settings.open_end,
        "Settings updated"
    );

    Ok(Json(settings))
}

// ─── Monthly Hours ───────────────────────────────────────────

#[derive(Serialize)]
pub struct HoursResponse {
    pub year: i32,
    pub month: u32,
    pub rows: Vec<hours::EmployeeHours>,
}

/// Per-employee worked-hours report for a month (admin only).
async fn get_hours(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<HoursResponse>> {
    require_admin(&auth)?;
    validate_month(query.month)?;

    let shifts = state.db.shifts_for_month(query.year, query.month).await?;
    let employees = state.db.list_employees().await?;

    Ok(Json(HoursResponse {
        year: query.year,
        month: query.month,
        rows: hours::compute_monthly_hours(query.year, query.month, &shifts, &employees),
    }))
}
