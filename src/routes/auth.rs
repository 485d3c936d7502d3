// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PIN login and session routes.
//!
//! Every employee logs in with their id plus a six-digit PIN
//! (`"000000"` until changed). Sessions are stateless JWTs delivered
//! both in the response body and as a cookie.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::Role;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/pin", post(change_pin))
        .route("/auth/logout", get(logout))
}

/// Compare PINs without leaking where they diverge.
fn pin_matches(stored: &str, submitted: &str) -> bool {
    stored.as_bytes().ct_eq(submitted.as_bytes()).into()
}

/// A PIN must be exactly six ASCII digits.
fn valid_pin_format(pin: &str) -> bool {
    pin.len() == 6 && pin.bytes().all(|b| b.is_ascii_digit())
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub employee_id: String,
    pub pin: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee_id: String,
    pub name: String,
    pub role: Role,
}

/// Verify an employee's PIN and issue a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let employee = state
        .db
        .get_employee(&req.employee_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !pin_matches(&employee.pin, &req.pin) {
        tracing::warn!(employee_id = %req.employee_id, "Login rejected: wrong PIN");
        return Err(AppError::Unauthorized);
    }

    let token = create_jwt(&employee.id, employee.role, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(employee_id = %employee.id, role = employee.role.as_str(), "Login");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            employee_id: employee.id,
            name: employee.name,
            role: employee.role,
        }),
    ))
}

// ─── PIN Change ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePinRequest {
    pub employee_id: String,
    pub current_pin: String,
    pub new_pin: String,
}

#[derive(Serialize)]
pub struct ChangePinResponse {
    pub success: bool,
}

/// Self-service PIN change; the current PIN authenticates the request.
async fn change_pin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangePinRequest>,
) -> Result<Json<ChangePinResponse>> {
    if !valid_pin_format(&req.new_pin) {
        return Err(AppError::BadRequest(
            "PIN must be exactly six digits".to_string(),
        ));
    }

    let mut employee = state
        .db
        .get_employee(&req.employee_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !pin_matches(&employee.pin, &req.current_pin) {
        tracing::warn!(employee_id = %req.employee_id, "PIN change rejected: wrong PIN");
        return Err(AppError::Unauthorized);
    }

    employee.pin = req.new_pin;
    state.db.upsert_employee(&employee).await?;

    tracing::info!(employee_id = %employee.id, "PIN changed");

    Ok(Json(ChangePinResponse { success: true }))
}

// ─── Logout ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Drop the session cookie. The JWT itself stays valid until expiry;
/// there is no server-side session store to revoke.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    (
        jar.remove(Cookie::from(SESSION_COOKIE)),
        Json(LogoutResponse { success: true }),
    )
}
