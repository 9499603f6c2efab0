// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Rotascope porter tracking system.
//!
//! This crate provides the `SQLite` entity store and the freeze store. It is
//! built on Diesel with embedded migrations.
//!
//! ## Entity store
//!
//! Departments, services, shifts, porters, and per-day custom hours are
//! created and soft-deleted here; the schedule engine reads the active set.
//!
//! ## Freeze store
//!
//! The freeze store persists immutable, date-keyed snapshots of the
//! assembled schedule. Each snapshot is one `frozen_schedules` row holding
//! a versioned JSON document plus one `frozen_porter_assignments` row per
//! (shift, porter) pair, all written in a single transaction. At most one
//! snapshot exists per date; re-freezing a date is an explicit no-op. Rows
//! are never updated or deleted once written.
//!
//! ## Testing
//!
//! Tests run against unique in-memory databases. Each call to
//! [`Persistence::new_in_memory`] receives its own shared-cache database
//! named from an atomic counter, so parallel tests never collide.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rotascope_domain::{Department, Porter, PorterHours, Service, Shift};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    FreezeOutcome, FrozenPorterAssignmentRecord, FrozenScheduleDocument, FrozenScheduleRecord,
    FrozenSnapshot, SNAPSHOT_SCHEMA_VERSION,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias kept for symmetry with the file-based constructor.
pub type SqlitePersistence = Persistence;

/// Persistence adapter for the entity store and the freeze store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared in-memory database name per call so tests are
        // isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_rotascope_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file-backed databases
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Entity store
    // ========================================================================

    /// Inserts a new department and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_department(&mut self, department: &Department) -> Result<i64, PersistenceError> {
        mutations::entities::create_department(&mut self.conn, department)
    }

    /// Lists all active departments, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        queries::entities::list_departments(&mut self.conn)
    }

    /// Soft-deletes a department.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no active department has the
    /// id.
    pub fn deactivate_department(&mut self, department_id: i64) -> Result<(), PersistenceError> {
        mutations::entities::deactivate_department(&mut self.conn, department_id)
    }

    /// Inserts a new service and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service(&mut self, service: &Service) -> Result<i64, PersistenceError> {
        mutations::entities::create_service(&mut self.conn, service)
    }

    /// Lists all active services, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_services(&mut self) -> Result<Vec<Service>, PersistenceError> {
        queries::entities::list_services(&mut self.conn)
    }

    /// Soft-deletes a service.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no active service has the id.
    pub fn deactivate_service(&mut self, service_id: i64) -> Result<(), PersistenceError> {
        mutations::entities::deactivate_service(&mut self.conn, service_id)
    }

    /// Inserts a new shift and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift(&mut self, shift: &Shift) -> Result<i64, PersistenceError> {
        mutations::entities::create_shift(&mut self.conn, shift)
    }

    /// Lists all active shifts, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored data is invalid.
    pub fn list_shifts(&mut self) -> Result<Vec<Shift>, PersistenceError> {
        queries::entities::list_shifts(&mut self.conn)
    }

    /// Soft-deletes a shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no active shift has the id.
    pub fn deactivate_shift(&mut self, shift_id: i64) -> Result<(), PersistenceError> {
        mutations::entities::deactivate_shift(&mut self.conn, shift_id)
    }

    /// Inserts a new porter and returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_porter(&mut self, porter: &Porter) -> Result<i64, PersistenceError> {
        mutations::entities::create_porter(&mut self.conn, porter)
    }

    /// Lists all active porters, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored data is invalid.
    pub fn list_porters(&mut self) -> Result<Vec<Porter>, PersistenceError> {
        queries::entities::list_porters(&mut self.conn)
    }

    /// Soft-deletes a porter.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no active porter has the id.
    pub fn deactivate_porter(&mut self, porter_id: i64) -> Result<(), PersistenceError> {
        mutations::entities::deactivate_porter(&mut self.conn, porter_id)
    }

    /// Lists the custom working windows of one porter.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the porter does not exist.
    pub fn porter_hours(&mut self, porter_id: i64) -> Result<Vec<PorterHours>, PersistenceError> {
        if !queries::entities::porter_exists(&mut self.conn, porter_id)? {
            return Err(PersistenceError::NotFound(format!(
                "Porter {porter_id} not found"
            )));
        }
        queries::entities::porter_hours_for_porter(&mut self.conn, porter_id)
    }

    /// Lists every porter's custom working windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_porter_hours(&mut self) -> Result<Vec<PorterHours>, PersistenceError> {
        queries::entities::all_porter_hours(&mut self.conn)
    }

    /// Replaces a porter's full set of custom working windows
    /// (last-write-wins).
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the porter does not exist, or
    /// a database error if the transactional replacement fails.
    pub fn replace_porter_hours(
        &mut self,
        porter_id: i64,
        hours: &[PorterHours],
    ) -> Result<(), PersistenceError> {
        mutations::entities::replace_porter_hours(&mut self.conn, porter_id, hours)
    }

    // ========================================================================
    // Freeze store
    // ========================================================================

    /// Freezes the schedule for a date.
    ///
    /// Idempotent per date: a date that already has a snapshot returns
    /// [`FreezeOutcome::AlreadyFrozen`] without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the freeze transaction fails; the transaction
    /// rolls back in full.
    pub fn freeze_schedule(&mut self, date: Date) -> Result<FreezeOutcome, PersistenceError> {
        mutations::freeze::freeze_schedule(&mut self.conn, date)
    }

    /// Retrieves the frozen snapshot for a date.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no snapshot exists, or a
    /// version/serialization error if the stored document cannot be read.
    pub fn get_frozen_schedule(&mut self, date: Date) -> Result<FrozenSnapshot, PersistenceError> {
        queries::freeze::get_frozen_schedule(&mut self.conn, date)
    }

    /// Returns whether a frozen snapshot exists for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn is_date_frozen(&mut self, date: Date) -> Result<bool, PersistenceError> {
        queries::freeze::is_date_frozen(&mut self.conn, date)
    }

    /// Lists the denormalized assignment rows of a frozen schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn frozen_assignments(
        &mut self,
        frozen_schedule_id: i64,
    ) -> Result<Vec<FrozenPorterAssignmentRecord>, PersistenceError> {
        queries::freeze::list_frozen_assignments(&mut self.conn, frozen_schedule_id)
    }
}
