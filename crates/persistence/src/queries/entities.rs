// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity reads.
//!
//! All queries return the active set only, ordered by name, matching what
//! the schedule engine consumes. Stored dates are `YYYY-MM-DD` text and are
//! parsed back into `time::Date` on the way out.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rotascope_domain::{
    ContractedHoursType, Department, Porter, PorterHours, PorterType, Service, Shift, parse_date,
};

use crate::diesel_schema::{departments, porter_hours, porters, services, shifts};
use crate::error::PersistenceError;

/// Row tuple for the `porters` table, in declared column order.
type PorterRow = (
    i64,
    String,
    Option<String>,
    String,
    String,
    f64,
    Option<i64>,
    i32,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<String>,
    Option<String>,
    i32,
);

/// Parses a stored date column value.
fn parse_stored_date(column: &str, value: &str) -> Result<time::Date, PersistenceError> {
    parse_date(value)
        .map_err(|e| PersistenceError::InvalidStoredData(format!("{column}: {e}")))
}

/// Parses an optional stored date column value.
fn parse_stored_date_option(
    column: &str,
    value: Option<String>,
) -> Result<Option<time::Date>, PersistenceError> {
    value.map(|v| parse_stored_date(column, &v)).transpose()
}

/// Lists all active departments, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(conn: &mut SqliteConnection) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<(i64, String, i32, i32, i32, i32)> = departments::table
        .filter(departments::is_active.eq(1))
        .order(departments::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(department_id, name, is_24_7, required_day, required_night, is_active)| Department {
                department_id: Some(department_id),
                name,
                is_24_7: is_24_7 != 0,
                porters_required_day: required_day,
                porters_required_night: required_night,
                is_active: is_active != 0,
            },
        )
        .collect())
}

/// Lists all active services, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_services(conn: &mut SqliteConnection) -> Result<Vec<Service>, PersistenceError> {
    let rows: Vec<(i64, String, i32, i32, i32, i32)> = services::table
        .filter(services::is_active.eq(1))
        .order(services::name.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(service_id, name, is_24_7, required_day, required_night, is_active)| Service {
                service_id: Some(service_id),
                name,
                is_24_7: is_24_7 != 0,
                porters_required_day: required_day,
                porters_required_night: required_night,
                is_active: is_active != 0,
            },
        )
        .collect())
}

/// Lists all active shifts, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored ground zero date cannot
/// be parsed.
pub fn list_shifts(conn: &mut SqliteConnection) -> Result<Vec<Shift>, PersistenceError> {
    let rows: Vec<(i64, String, String, String, i32, i32, i32, String, i32)> = shifts::table
        .filter(shifts::is_active.eq(1))
        .order(shifts::name.asc())
        .load(conn)?;

    rows.into_iter()
        .map(
            |(
                shift_id,
                name,
                starts_at,
                ends_at,
                days_on,
                days_off,
                shift_offset,
                ground_zero_date,
                is_active,
            )| {
                Ok(Shift {
                    shift_id: Some(shift_id),
                    name,
                    starts_at,
                    ends_at,
                    days_on,
                    days_off,
                    shift_offset,
                    ground_zero_date: parse_stored_date("ground_zero_date", &ground_zero_date)?,
                    is_active: is_active != 0,
                })
            },
        )
        .collect()
}

/// Lists all active porters, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored assignment date cannot
/// be parsed.
pub fn list_porters(conn: &mut SqliteConnection) -> Result<Vec<Porter>, PersistenceError> {
    let rows: Vec<PorterRow> = porters::table
        .filter(porters::is_active.eq(1))
        .order(porters::name.asc())
        .load(conn)?;

    rows.into_iter().map(porter_from_row).collect()
}

/// Converts a porter row tuple into a domain `Porter`.
fn porter_from_row(row: PorterRow) -> Result<Porter, PersistenceError> {
    let (
        porter_id,
        name,
        email,
        porter_type,
        contracted_hours_type,
        weekly_contracted_hours,
        shift_id,
        porter_offset,
        regular_department_id,
        regular_service_id,
        temp_department_id,
        temp_service_id,
        temp_assignment_start,
        temp_assignment_end,
        is_active,
    ) = row;

    Ok(Porter {
        porter_id: Some(porter_id),
        name,
        email,
        porter_type: PorterType::new(&porter_type),
        contracted_hours_type: ContractedHoursType::new(&contracted_hours_type),
        weekly_contracted_hours,
        shift_id,
        porter_offset,
        regular_department_id,
        regular_service_id,
        temp_department_id,
        temp_service_id,
        temp_assignment_start: parse_stored_date_option(
            "temp_assignment_start",
            temp_assignment_start,
        )?,
        temp_assignment_end: parse_stored_date_option("temp_assignment_end", temp_assignment_end)?,
        is_active: is_active != 0,
    })
}

/// Returns whether an active porter with the given id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn porter_exists(conn: &mut SqliteConnection, porter_id: i64) -> Result<bool, PersistenceError> {
    let found: Option<i64> = porters::table
        .select(porters::porter_id)
        .filter(porters::porter_id.eq(porter_id))
        .filter(porters::is_active.eq(1))
        .first::<i64>(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Lists the custom working windows of one porter, ordered by day of week.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn porter_hours_for_porter(
    conn: &mut SqliteConnection,
    porter_id: i64,
) -> Result<Vec<PorterHours>, PersistenceError> {
    let rows: Vec<(i64, i64, i32, String, String)> = porter_hours::table
        .filter(porter_hours::porter_id.eq(porter_id))
        .order(porter_hours::day_of_week.asc())
        .load(conn)?;

    rows.into_iter().map(porter_hours_from_row).collect()
}

/// Lists every porter's custom working windows.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn all_porter_hours(conn: &mut SqliteConnection) -> Result<Vec<PorterHours>, PersistenceError> {
    let rows: Vec<(i64, i64, i32, String, String)> = porter_hours::table
        .order((porter_hours::porter_id.asc(), porter_hours::day_of_week.asc()))
        .load(conn)?;

    rows.into_iter().map(porter_hours_from_row).collect()
}

/// Converts a porter hours row tuple into a domain `PorterHours`.
fn porter_hours_from_row(
    row: (i64, i64, i32, String, String),
) -> Result<PorterHours, PersistenceError> {
    let (porter_hours_id, porter_id, day_of_week, starts_at, ends_at) = row;
    let day: u8 = u8::try_from(day_of_week).map_err(|_| {
        PersistenceError::InvalidStoredData(format!("day_of_week out of range: {day_of_week}"))
    })?;
    Ok(PorterHours {
        porter_hours_id: Some(porter_hours_id),
        porter_id,
        day_of_week: day,
        starts_at,
        ends_at,
    })
}
