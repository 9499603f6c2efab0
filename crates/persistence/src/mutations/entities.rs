// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity mutations.
//!
//! Deletion is soft everywhere: rows flip `is_active` to 0 and disappear
//! from the engine's inputs while remaining referenceable from historical
//! frozen assignments.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rotascope_domain::{Department, Porter, PorterHours, Service, Shift, format_date};
use tracing::debug;

use crate::diesel_schema::{departments, porter_hours, porters, services, shifts};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new department and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::name.eq(&department.name),
            departments::is_24_7.eq(i32::from(department.is_24_7)),
            departments::porters_required_day.eq(department.porters_required_day),
            departments::porters_required_night.eq(department.porters_required_night),
            departments::is_active.eq(i32::from(department.is_active)),
        ))
        .execute(conn)?;

    let department_id: i64 = get_last_insert_rowid(conn)?;
    debug!(department_id, name = %department.name, "Created department");
    Ok(department_id)
}

/// Inserts a new service and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_service(
    conn: &mut SqliteConnection,
    service: &Service,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(services::table)
        .values((
            services::name.eq(&service.name),
            services::is_24_7.eq(i32::from(service.is_24_7)),
            services::porters_required_day.eq(service.porters_required_day),
            services::porters_required_night.eq(service.porters_required_night),
            services::is_active.eq(i32::from(service.is_active)),
        ))
        .execute(conn)?;

    let service_id: i64 = get_last_insert_rowid(conn)?;
    debug!(service_id, name = %service.name, "Created service");
    Ok(service_id)
}

/// Inserts a new shift and returns its assigned id.
///
/// The shift must have passed domain validation: the cycle calculator
/// assumes every stored shift has a positive cycle length.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_shift(conn: &mut SqliteConnection, shift: &Shift) -> Result<i64, PersistenceError> {
    diesel::insert_into(shifts::table)
        .values((
            shifts::name.eq(&shift.name),
            shifts::starts_at.eq(&shift.starts_at),
            shifts::ends_at.eq(&shift.ends_at),
            shifts::days_on.eq(shift.days_on),
            shifts::days_off.eq(shift.days_off),
            shifts::shift_offset.eq(shift.shift_offset),
            shifts::ground_zero_date.eq(format_date(shift.ground_zero_date)),
            shifts::is_active.eq(i32::from(shift.is_active)),
        ))
        .execute(conn)?;

    let shift_id: i64 = get_last_insert_rowid(conn)?;
    debug!(shift_id, name = %shift.name, "Created shift");
    Ok(shift_id)
}

/// Inserts a new porter and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails (including foreign key violations
/// for dangling shift or location references).
pub fn create_porter(
    conn: &mut SqliteConnection,
    porter: &Porter,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(porters::table)
        .values((
            porters::name.eq(&porter.name),
            porters::email.eq(porter.email.as_deref()),
            porters::porter_type.eq(porter.porter_type.value()),
            porters::contracted_hours_type.eq(porter.contracted_hours_type.value()),
            porters::weekly_contracted_hours.eq(porter.weekly_contracted_hours),
            porters::shift_id.eq(porter.shift_id),
            porters::porter_offset.eq(porter.porter_offset),
            porters::regular_department_id.eq(porter.regular_department_id),
            porters::regular_service_id.eq(porter.regular_service_id),
            porters::temp_department_id.eq(porter.temp_department_id),
            porters::temp_service_id.eq(porter.temp_service_id),
            porters::temp_assignment_start.eq(porter.temp_assignment_start.map(format_date)),
            porters::temp_assignment_end.eq(porter.temp_assignment_end.map(format_date)),
            porters::is_active.eq(i32::from(porter.is_active)),
        ))
        .execute(conn)?;

    let porter_id: i64 = get_last_insert_rowid(conn)?;
    debug!(porter_id, name = %porter.name, "Created porter");
    Ok(porter_id)
}

/// Soft-deletes a department.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no active department has the id.
pub fn deactivate_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        departments::table
            .filter(departments::department_id.eq(department_id))
            .filter(departments::is_active.eq(1)),
    )
    .set(departments::is_active.eq(0))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Department {department_id} not found"
        )));
    }
    Ok(())
}

/// Soft-deletes a service.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no active service has the id.
pub fn deactivate_service(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        services::table
            .filter(services::service_id.eq(service_id))
            .filter(services::is_active.eq(1)),
    )
    .set(services::is_active.eq(0))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Service {service_id} not found"
        )));
    }
    Ok(())
}

/// Soft-deletes a shift.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no active shift has the id.
pub fn deactivate_shift(
    conn: &mut SqliteConnection,
    shift_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        shifts::table
            .filter(shifts::shift_id.eq(shift_id))
            .filter(shifts::is_active.eq(1)),
    )
    .set(shifts::is_active.eq(0))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift {shift_id} not found"
        )));
    }
    Ok(())
}

/// Soft-deletes a porter.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no active porter has the id.
pub fn deactivate_porter(
    conn: &mut SqliteConnection,
    porter_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        porters::table
            .filter(porters::porter_id.eq(porter_id))
            .filter(porters::is_active.eq(1)),
    )
    .set(porters::is_active.eq(0))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Porter {porter_id} not found"
        )));
    }
    Ok(())
}

/// Replaces a porter's full set of custom working windows.
///
/// Delete-then-insert inside one transaction: the replacement is
/// last-write-wins over the whole set, and the unique (porter, day)
/// constraint can never observe a partial state.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the porter does not exist, or a
/// database error if any insert fails (the whole replacement rolls back).
pub fn replace_porter_hours(
    conn: &mut SqliteConnection,
    porter_id: i64,
    hours: &[PorterHours],
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        if !queries::entities::porter_exists(conn, porter_id)? {
            return Err(PersistenceError::NotFound(format!(
                "Porter {porter_id} not found"
            )));
        }

        diesel::delete(porter_hours::table.filter(porter_hours::porter_id.eq(porter_id)))
            .execute(conn)?;

        for entry in hours {
            diesel::insert_into(porter_hours::table)
                .values((
                    porter_hours::porter_id.eq(porter_id),
                    porter_hours::day_of_week.eq(i32::from(entry.day_of_week)),
                    porter_hours::starts_at.eq(&entry.starts_at),
                    porter_hours::ends_at.eq(&entry.ends_at),
                ))
                .execute(conn)?;
        }

        debug!(porter_id, entries = hours.len(), "Replaced porter hours");
        Ok(())
    })
}
