// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Department, Porter, Service, Shift};
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The accepted time-of-day format (`HH:MM`, 24-hour).
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// Validates a time-of-day string.
///
/// # Arguments
///
/// * `value` - The time string to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeOfDay` if the string is not a valid
/// `HH:MM` time.
pub fn validate_time_of_day(value: &str) -> Result<(), DomainError> {
    Time::parse(value, TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| DomainError::InvalidTimeOfDay(value.to_string()))
}

/// Validates a day-of-week value.
///
/// # Arguments
///
/// * `day` - The day value (0 = Sunday through 6 = Saturday)
///
/// # Errors
///
/// Returns `DomainError::InvalidDayOfWeek` if the value is outside 0-6.
pub fn validate_day_of_week(day: i32) -> Result<(), DomainError> {
    if !(0..=6).contains(&day) {
        return Err(DomainError::InvalidDayOfWeek { day });
    }
    Ok(())
}

/// Validates a shift's configuration.
///
/// This is the upstream guard for the cycle calculator: a shift that passes
/// here always has a positive cycle length.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - `days_on` or `days_off` is less than 1
/// - Either time string is not a valid `HH:MM` time
pub fn validate_shift(shift: &Shift) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if shift.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Shift name cannot be empty",
        )));
    }

    // Rule: both cycle blocks must be at least one day, so the cycle
    // length is always positive
    if shift.days_on < 1 || shift.days_off < 1 {
        return Err(DomainError::InvalidCycleConfiguration {
            days_on: shift.days_on,
            days_off: shift.days_off,
        });
    }

    validate_time_of_day(&shift.starts_at)?;
    validate_time_of_day(&shift.ends_at)?;

    Ok(())
}

/// Validates a porter's configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - Both a regular department and a regular service are set
/// - Both a temporary department and a temporary service are set
/// - The temporary assignment window ends before it starts
pub fn validate_porter(porter: &Porter) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if porter.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Porter name cannot be empty",
        )));
    }

    // Rule: the regular posting is a department XOR a service
    if porter.regular_department_id.is_some() && porter.regular_service_id.is_some() {
        return Err(DomainError::ConflictingRegularLocation {
            porter_name: porter.name.clone(),
        });
    }

    // Rule: the temporary override is a department XOR a service
    if porter.temp_department_id.is_some() && porter.temp_service_id.is_some() {
        return Err(DomainError::ConflictingTempLocation {
            porter_name: porter.name.clone(),
        });
    }

    // Rule: a temporary window must not end before it starts
    if let (Some(start), Some(end)) = (porter.temp_assignment_start, porter.temp_assignment_end) {
        if end < start {
            return Err(DomainError::InvalidTempAssignmentWindow { start, end });
        }
    }

    Ok(())
}

/// Validates a department's configuration.
///
/// # Errors
///
/// Returns an error if the name is empty or a required-porter count is
/// less than 1.
pub fn validate_department(department: &Department) -> Result<(), DomainError> {
    if department.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Department name cannot be empty",
        )));
    }
    validate_porters_required(department.porters_required_day)?;
    validate_porters_required(department.porters_required_night)?;
    Ok(())
}

/// Validates a service's configuration.
///
/// # Errors
///
/// Returns an error if the name is empty or a required-porter count is
/// less than 1.
pub fn validate_service(service: &Service) -> Result<(), DomainError> {
    if service.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Service name cannot be empty",
        )));
    }
    validate_porters_required(service.porters_required_day)?;
    validate_porters_required(service.porters_required_night)?;
    Ok(())
}

/// Validates a required-porter count.
fn validate_porters_required(count: i32) -> Result<(), DomainError> {
    if count < 1 {
        return Err(DomainError::InvalidPortersRequired { count });
    }
    Ok(())
}
