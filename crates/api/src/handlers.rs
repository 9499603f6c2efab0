// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler validates its input, calls the domain engine and the
//! persistence adapter, and shapes the response. The schedule engine
//! (cycle calculator, availability resolver, schedule assembler) is only
//! ever reached through these handlers and the freeze store, both of which
//! call the same domain functions.

use rotascope_domain::{
    AvailabilityContext, AvailabilityRecord, ContractedHoursType, Department, Porter, PorterHours,
    PorterType, ScheduleView, Service, Shift, assemble_schedule, format_date, is_shift_active,
    parse_date, resolve_availability, validate_day_of_week, validate_department, validate_porter,
    validate_service, validate_shift, validate_time_of_day,
};
use rotascope_persistence::{FreezeOutcome, FrozenSnapshot, Persistence};
use std::collections::HashMap;
use time::Date;
use tracing::info;

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    ActiveShiftsResponse, AvailabilityResponse, CreateDepartmentRequest, CreatePorterRequest,
    CreateServiceRequest, CreateShiftRequest, CreatedResponse, FreezeResponse,
    FrozenScheduleResponse, PorterHoursEntry, ReplacePorterHoursRequest,
};

/// Parses a `YYYY-MM-DD` request value into a date.
fn parse_date_input(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Parses an optional `YYYY-MM-DD` request value.
fn parse_optional_date_input(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(|v| parse_date_input(field, v)).transpose()
}

/// Creates a department.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_department(
    persistence: &mut Persistence,
    request: CreateDepartmentRequest,
) -> Result<CreatedResponse, ApiError> {
    let department: Department = Department::new(
        request.name,
        request.is_24_7,
        request.porters_required_day,
        request.porters_required_night,
    );
    validate_department(&department).map_err(translate_domain_error)?;

    let id: i64 = persistence
        .create_department(&department)
        .map_err(translate_persistence_error)?;

    info!(department_id = id, name = %department.name, "Created department");
    Ok(CreatedResponse {
        id,
        message: String::from("Department created successfully"),
    })
}

/// Lists all active departments.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_departments(persistence: &mut Persistence) -> Result<Vec<Department>, ApiError> {
    persistence
        .list_departments()
        .map_err(translate_persistence_error)
}

/// Soft-deletes a department.
///
/// # Errors
///
/// Returns an error if the department does not exist or persistence fails.
pub fn deactivate_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<(), ApiError> {
    persistence
        .deactivate_department(department_id)
        .map_err(translate_persistence_error)
}

/// Creates a service.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_service(
    persistence: &mut Persistence,
    request: CreateServiceRequest,
) -> Result<CreatedResponse, ApiError> {
    let service: Service = Service::new(
        request.name,
        request.is_24_7,
        request.porters_required_day,
        request.porters_required_night,
    );
    validate_service(&service).map_err(translate_domain_error)?;

    let id: i64 = persistence
        .create_service(&service)
        .map_err(translate_persistence_error)?;

    info!(service_id = id, name = %service.name, "Created service");
    Ok(CreatedResponse {
        id,
        message: String::from("Service created successfully"),
    })
}

/// Lists all active services.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_services(persistence: &mut Persistence) -> Result<Vec<Service>, ApiError> {
    persistence
        .list_services()
        .map_err(translate_persistence_error)
}

/// Soft-deletes a service.
///
/// # Errors
///
/// Returns an error if the service does not exist or persistence fails.
pub fn deactivate_service(persistence: &mut Persistence, service_id: i64) -> Result<(), ApiError> {
    persistence
        .deactivate_service(service_id)
        .map_err(translate_persistence_error)
}

/// Creates a shift.
///
/// Validation here is the upstream guard the cycle calculator relies on:
/// no shift with a nonpositive cycle length is ever stored.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_shift(
    persistence: &mut Persistence,
    request: CreateShiftRequest,
) -> Result<CreatedResponse, ApiError> {
    let ground_zero_date: Date = parse_date_input("ground_zero_date", &request.ground_zero_date)?;
    let shift: Shift = Shift::new(
        request.name,
        request.starts_at,
        request.ends_at,
        request.days_on,
        request.days_off,
        request.shift_offset,
        ground_zero_date,
    );
    validate_shift(&shift).map_err(translate_domain_error)?;

    let id: i64 = persistence
        .create_shift(&shift)
        .map_err(translate_persistence_error)?;

    info!(shift_id = id, name = %shift.name, "Created shift");
    Ok(CreatedResponse {
        id,
        message: String::from("Shift created successfully"),
    })
}

/// Lists all active shifts.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_shifts(persistence: &mut Persistence) -> Result<Vec<Shift>, ApiError> {
    persistence.list_shifts().map_err(translate_persistence_error)
}

/// Soft-deletes a shift.
///
/// # Errors
///
/// Returns an error if the shift does not exist or persistence fails.
pub fn deactivate_shift(persistence: &mut Persistence, shift_id: i64) -> Result<(), ApiError> {
    persistence
        .deactivate_shift(shift_id)
        .map_err(translate_persistence_error)
}

/// Creates a porter.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_porter(
    persistence: &mut Persistence,
    request: CreatePorterRequest,
) -> Result<CreatedResponse, ApiError> {
    let temp_assignment_start: Option<Date> = parse_optional_date_input(
        "temp_assignment_start",
        request.temp_assignment_start.as_deref(),
    )?;
    let temp_assignment_end: Option<Date> =
        parse_optional_date_input("temp_assignment_end", request.temp_assignment_end.as_deref())?;

    let porter: Porter = Porter::new(
        request.name,
        request.email,
        PorterType::new(&request.porter_type),
        ContractedHoursType::new(&request.contracted_hours_type),
        request.weekly_contracted_hours.unwrap_or(37.5),
        request.shift_id,
        request.porter_offset,
        request.regular_department_id,
        request.regular_service_id,
        request.temp_department_id,
        request.temp_service_id,
        temp_assignment_start,
        temp_assignment_end,
    );
    validate_porter(&porter).map_err(translate_domain_error)?;

    let id: i64 = persistence
        .create_porter(&porter)
        .map_err(translate_persistence_error)?;

    info!(porter_id = id, name = %porter.name, "Created porter");
    Ok(CreatedResponse {
        id,
        message: String::from("Porter created successfully"),
    })
}

/// Lists all active porters.
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_porters(persistence: &mut Persistence) -> Result<Vec<Porter>, ApiError> {
    persistence.list_porters().map_err(translate_persistence_error)
}

/// Soft-deletes a porter.
///
/// # Errors
///
/// Returns an error if the porter does not exist or persistence fails.
pub fn deactivate_porter(persistence: &mut Persistence, porter_id: i64) -> Result<(), ApiError> {
    persistence
        .deactivate_porter(porter_id)
        .map_err(translate_persistence_error)
}

/// Lists a porter's custom working windows.
///
/// # Errors
///
/// Returns an error if the porter does not exist or persistence fails.
pub fn get_porter_hours(
    persistence: &mut Persistence,
    porter_id: i64,
) -> Result<Vec<PorterHours>, ApiError> {
    persistence
        .porter_hours(porter_id)
        .map_err(translate_persistence_error)
}

/// Replaces a porter's full set of custom working windows.
///
/// The replacement is last-write-wins over the whole set; at most one
/// window survives per day of week.
///
/// # Errors
///
/// Returns an error if any entry is invalid, the porter does not exist, or
/// persistence fails.
pub fn replace_porter_hours(
    persistence: &mut Persistence,
    porter_id: i64,
    request: ReplacePorterHoursRequest,
) -> Result<(), ApiError> {
    let mut hours: Vec<PorterHours> = Vec::with_capacity(request.hours.len());
    for entry in request.hours {
        hours.push(porter_hours_from_entry(porter_id, &entry)?);
    }

    persistence
        .replace_porter_hours(porter_id, &hours)
        .map_err(translate_persistence_error)
}

/// Validates one replace-hours entry and converts it to a domain row.
fn porter_hours_from_entry(
    porter_id: i64,
    entry: &PorterHoursEntry,
) -> Result<PorterHours, ApiError> {
    validate_day_of_week(entry.day_of_week).map_err(translate_domain_error)?;
    validate_time_of_day(&entry.starts_at).map_err(translate_domain_error)?;
    validate_time_of_day(&entry.ends_at).map_err(translate_domain_error)?;
    let day: u8 = u8::try_from(entry.day_of_week).map_err(|_| ApiError::InvalidInput {
        field: String::from("day_of_week"),
        message: format!("Invalid day of week: {}", entry.day_of_week),
    })?;
    Ok(PorterHours::new(
        porter_id,
        day,
        entry.starts_at.clone(),
        entry.ends_at.clone(),
    ))
}

/// Lists the shifts active on a date.
///
/// # Errors
///
/// Returns an error if the date is invalid or persistence fails.
pub fn list_active_shifts(
    persistence: &mut Persistence,
    date: &str,
) -> Result<ActiveShiftsResponse, ApiError> {
    let target_date: Date = parse_date_input("date", date)?;
    let shifts: Vec<Shift> = persistence.list_shifts().map_err(translate_persistence_error)?;

    let active_shifts: Vec<Shift> = shifts
        .into_iter()
        .filter(|shift| is_shift_active(target_date, shift))
        .collect();

    Ok(ActiveShiftsResponse {
        date: format_date(target_date),
        active_shifts,
    })
}

/// Resolves the availability view for a date.
///
/// Every active porter is run through the availability resolver; porters
/// with no match on the date are omitted.
///
/// # Errors
///
/// Returns an error if the date is invalid or persistence fails.
pub fn get_availability(
    persistence: &mut Persistence,
    date: &str,
) -> Result<AvailabilityResponse, ApiError> {
    let target_date: Date = parse_date_input("date", date)?;
    let day_of_week: u8 = target_date.weekday().number_days_from_sunday();

    let departments: Vec<Department> = persistence
        .list_departments()
        .map_err(translate_persistence_error)?;
    let services: Vec<Service> = persistence
        .list_services()
        .map_err(translate_persistence_error)?;
    let shifts: Vec<Shift> = persistence.list_shifts().map_err(translate_persistence_error)?;
    let porters: Vec<Porter> = persistence
        .list_porters()
        .map_err(translate_persistence_error)?;
    let all_hours: Vec<PorterHours> = persistence
        .all_porter_hours()
        .map_err(translate_persistence_error)?;

    let shifts_by_id: HashMap<i64, Shift> = shifts
        .iter()
        .filter_map(|shift| shift.shift_id.map(|id| (id, shift.clone())))
        .collect();
    let departments_by_id: HashMap<i64, Department> = departments
        .iter()
        .filter_map(|department| department.department_id.map(|id| (id, department.clone())))
        .collect();
    let services_by_id: HashMap<i64, Service> = services
        .iter()
        .filter_map(|service| service.service_id.map(|id| (id, service.clone())))
        .collect();
    let mut custom_hours: HashMap<i64, Vec<PorterHours>> = HashMap::new();
    for entry in all_hours {
        custom_hours.entry(entry.porter_id).or_default().push(entry);
    }

    let context: AvailabilityContext<'_> = AvailabilityContext {
        shifts: &shifts_by_id,
        departments: &departments_by_id,
        services: &services_by_id,
        custom_hours: &custom_hours,
    };

    let available_porters: Vec<AvailabilityRecord> = porters
        .iter()
        .filter_map(|porter| resolve_availability(porter, target_date, day_of_week, &context))
        .collect();

    Ok(AvailabilityResponse {
        date: format_date(target_date),
        available_porters,
        departments,
        services,
        shifts,
    })
}

/// Assembles the live composite schedule view for a date.
///
/// # Errors
///
/// Returns an error if the date is invalid or persistence fails.
pub fn get_schedule(persistence: &mut Persistence, date: &str) -> Result<ScheduleView, ApiError> {
    let target_date: Date = parse_date_input("date", date)?;

    let departments: Vec<Department> = persistence
        .list_departments()
        .map_err(translate_persistence_error)?;
    let services: Vec<Service> = persistence
        .list_services()
        .map_err(translate_persistence_error)?;
    let shifts: Vec<Shift> = persistence.list_shifts().map_err(translate_persistence_error)?;
    let porters: Vec<Porter> = persistence
        .list_porters()
        .map_err(translate_persistence_error)?;

    Ok(assemble_schedule(
        target_date,
        departments,
        services,
        &shifts,
        &porters,
    ))
}

/// Retrieves the frozen snapshot for a date.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the date has no snapshot, or an
/// internal error if the stored document cannot be read.
pub fn get_frozen_schedule(
    persistence: &mut Persistence,
    date: &str,
) -> Result<FrozenScheduleResponse, ApiError> {
    let target_date: Date = parse_date_input("date", date)?;

    let snapshot: FrozenSnapshot = persistence
        .get_frozen_schedule(target_date)
        .map_err(translate_persistence_error)?;

    Ok(FrozenScheduleResponse {
        schedule: snapshot.document.schedule,
        frozen_at: snapshot.record.frozen_at,
        is_frozen: true,
    })
}

/// Freezes the schedule for a date.
///
/// Idempotent per date: freezing an already-frozen date reports success
/// with `frozen: false` and writes nothing.
///
/// # Errors
///
/// Returns an error if the freeze transaction fails.
pub fn freeze_date(persistence: &mut Persistence, date: Date) -> Result<FreezeResponse, ApiError> {
    let outcome: FreezeOutcome = persistence
        .freeze_schedule(date)
        .map_err(translate_persistence_error)?;

    let date_text: String = format_date(date);
    let response: FreezeResponse = match outcome {
        FreezeOutcome::Frozen(record) => {
            info!(
                date = %date_text,
                frozen_schedule_id = record.frozen_schedule_id,
                "Manually froze schedule"
            );
            FreezeResponse {
                date: date_text.clone(),
                frozen: true,
                message: format!("Data freezing completed for {date_text}"),
            }
        }
        FreezeOutcome::AlreadyFrozen => FreezeResponse {
            date: date_text.clone(),
            frozen: false,
            message: format!("Date {date_text} is already frozen"),
        },
    };
    Ok(response)
}
