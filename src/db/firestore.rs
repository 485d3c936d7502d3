// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Employees (roster storage)
//! - Shifts (calendar cells, keyed `date_employeeId_type`)
//! - Availability (per-day submissions, keyed `date_employeeId`)
//! - Settings (singleton submission-window record)
//!
//! The scheduling engines never touch this module directly; they emit a
//! `WriteSet` and the route layer commits it here in one transaction.

use crate::db::{collections, SETTINGS_DOC_ID};
use crate::error::AppError;
use crate::models::{availability_doc_id, AvailabilityRecord, Employee, Settings, Shift};
use crate::services::assignment::WriteSet;
use crate::time_utils::{days_in_month, format_date};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Employee Operations ─────────────────────────────────────

    /// Get an employee by id.
    pub async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::EMPLOYEES)
            .obj()
            .one(employee_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the whole roster.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::EMPLOYEES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an employee.
    pub async fn upsert_employee(&self, employee: &Employee) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::EMPLOYEES)
            .document_id(&employee.id)
            .object(employee)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an employee record.
    ///
    /// The employee's shift and availability documents are left in place;
    /// read paths tolerate ids that no longer resolve.
    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::EMPLOYEES)
            .document_id(employee_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Write the default roster if the collection is empty.
    ///
    /// Returns the number of employees seeded (0 when the roster already
    /// has entries).
    pub async fn seed_roster_if_empty(&self, roster: &[Employee]) -> Result<usize, AppError> {
        if !self.list_employees().await?.is_empty() {
            return Ok(0);
        }
        for employee in roster {
            self.upsert_employee(employee).await?;
        }
        tracing::info!(count = roster.len(), "Seeded default roster");
        Ok(roster.len())
    }

    // ─── Settings Operations ─────────────────────────────────────

    /// Get the singleton settings record, if one has been written.
    pub async fn get_settings(&self) -> Result<Option<Settings>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::SETTINGS)
            .obj()
            .one(SETTINGS_DOC_ID)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store the singleton settings record.
    pub async fn set_settings(&self, settings: &Settings) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::SETTINGS)
            .document_id(SETTINGS_DOC_ID)
            .object(settings)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Shift Operations ────────────────────────────────────────

    /// Get every shift for one date.
    pub async fn shifts_for_date(&self, date: &str) -> Result<Vec<Shift>, AppError> {
        let date = date.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SHIFTS)
            .filter(move |q| q.for_all([q.field("date").eq(date.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every shift in a month (`month` is 0-indexed).
    pub async fn shifts_for_month(&self, year: i32, month: u32) -> Result<Vec<Shift>, AppError> {
        let start = format_date(year, month, 1);
        let end = format_date(year, month, days_in_month(year, month));
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SHIFTS)
            .filter(move |q| {
                q.for_all([
                    q.field("date").greater_than_or_equal(start.clone()),
                    q.field("date").less_than_or_equal(end.clone()),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Availability Operations ─────────────────────────────────

    /// Get one employee's availability record for a date, if submitted.
    pub async fn get_availability(
        &self,
        date: &str,
        employee_id: &str,
    ) -> Result<Option<AvailabilityRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::AVAILABILITY)
            .obj()
            .one(&availability_doc_id(date, employee_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every availability record in a month (`month` is 0-indexed).
    pub async fn availability_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<AvailabilityRecord>, AppError> {
        let start = format_date(year, month, 1);
        let end = format_date(year, month, days_in_month(year, month));
        self.get_client()?
            .fluent()
            .select()
            .from(collections::AVAILABILITY)
            .filter(move |q| {
                q.for_all([
                    q.field("date").greater_than_or_equal(start.clone()),
                    q.field("date").less_than_or_equal(end.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store one availability record (last write wins).
    pub async fn upsert_availability(
        &self,
        record: &AvailabilityRecord,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::AVAILABILITY)
            .document_id(&record.id)
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Atomic Write-Set Commit ─────────────────────────────────

    /// Commit a shift write-set in a single Firestore transaction.
    ///
    /// All upserts and deletions land together or not at all; a partial
    /// apply would leave a day violating the off/working exclusion the
    /// assignment engine enforces. A failed commit surfaces as a
    /// `Database` error and is not retried here.
    pub async fn commit_write_set(&self, write_set: &WriteSet) -> Result<(), AppError> {
        if write_set.is_empty() {
            return Ok(());
        }

        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for shift in &write_set.upserts {
            client
                .fluent()
                .update()
                .in_col(collections::SHIFTS)
                .document_id(&shift.id)
                .object(shift)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add shift upsert to transaction: {}", e))
                })?;
        }

        for doc_id in &write_set.deletes {
            client
                .fluent()
                .delete()
                .from(collections::SHIFTS)
                .document_id(doc_id)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add shift deletion to transaction: {}",
                        e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            upserts = write_set.upserts.len(),
            deletes = write_set.deletes.len(),
            "Shift write-set committed"
        );

        Ok(())
    }

    /// Delete shift documents in transaction-sized chunks.
    ///
    /// Used by month-clear, where the id count can exceed a single
    /// transaction's limit; each chunk commits atomically on its own.
    pub async fn batch_delete_shifts(&self, doc_ids: &[String]) -> Result<(), AppError> {
        let client = self.get_client()?;

        for chunk in doc_ids.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for doc_id in chunk {
                client
                    .fluent()
                    .delete()
                    .from(collections::SHIFTS)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction: {}",
                            e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}
