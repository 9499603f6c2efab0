// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes for the API layer.
//!
//! Dates cross this boundary as `YYYY-MM-DD` strings and are parsed in the
//! handlers; domain types with validated dates never hold raw strings.

use rotascope_domain::{AvailabilityRecord, Department, ScheduleView, Service, Shift};
use serde::{Deserialize, Serialize};

/// Request to create a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// The department name.
    pub name: String,
    /// Whether the department requires around-the-clock coverage.
    #[serde(default)]
    pub is_24_7: bool,
    /// Porters required during the day period.
    pub porters_required_day: i32,
    /// Porters required during the night period.
    pub porters_required_night: i32,
}

/// Request to create a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    /// The service name.
    pub name: String,
    /// Whether the service requires around-the-clock coverage.
    #[serde(default)]
    pub is_24_7: bool,
    /// Porters required during the day period.
    pub porters_required_day: i32,
    /// Porters required during the night period.
    pub porters_required_night: i32,
}

/// Request to create a shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShiftRequest {
    /// The shift name.
    pub name: String,
    /// Working day start time (`HH:MM`).
    pub starts_at: String,
    /// Working day end time (`HH:MM`).
    pub ends_at: String,
    /// Consecutive working days per cycle.
    pub days_on: i32,
    /// Consecutive rest days per cycle.
    pub days_off: i32,
    /// Day offset applied to the cycle position.
    #[serde(default)]
    pub shift_offset: i32,
    /// The cycle reference date (`YYYY-MM-DD`).
    pub ground_zero_date: String,
}

/// Request to create a porter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePorterRequest {
    /// The porter's name.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Role classification (open vocabulary, e.g. `PORTER`).
    pub porter_type: String,
    /// Contracted-hours classification (open vocabulary, e.g. `SHIFT`).
    pub contracted_hours_type: String,
    /// Contracted hours per week. Defaults to 37.5.
    pub weekly_contracted_hours: Option<f64>,
    /// Owning shift, if the porter works a rotating pattern.
    pub shift_id: Option<i64>,
    /// Personal day offset within the shift cycle.
    #[serde(default)]
    pub porter_offset: i32,
    /// Permanent department assignment.
    pub regular_department_id: Option<i64>,
    /// Permanent service assignment.
    pub regular_service_id: Option<i64>,
    /// Temporary department override.
    pub temp_department_id: Option<i64>,
    /// Temporary service override.
    pub temp_service_id: Option<i64>,
    /// First day of the temporary window (`YYYY-MM-DD`).
    pub temp_assignment_start: Option<String>,
    /// Last day of the temporary window (`YYYY-MM-DD`).
    pub temp_assignment_end: Option<String>,
}

/// One custom working window in a replace-hours request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PorterHoursEntry {
    /// Day of week: 0 = Sunday through 6 = Saturday.
    pub day_of_week: i32,
    /// Window start time (`HH:MM`).
    pub starts_at: String,
    /// Window end time (`HH:MM`).
    pub ends_at: String,
}

/// Request to replace a porter's full set of custom working windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacePorterHoursRequest {
    /// The replacement set. An empty list clears all custom hours.
    pub hours: Vec<PorterHoursEntry>,
}

/// Response for entity creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The assigned identifier.
    pub id: i64,
    /// A success message.
    pub message: String,
}

/// Response for the active-shifts-by-date view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveShiftsResponse {
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
    /// Shifts active on the date.
    pub active_shifts: Vec<Shift>,
}

/// Response for the availability-by-date view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The requested date (`YYYY-MM-DD`).
    pub date: String,
    /// One resolved record per available porter.
    pub available_porters: Vec<AvailabilityRecord>,
    /// All active departments.
    pub departments: Vec<Department>,
    /// All active services.
    pub services: Vec<Service>,
    /// All active shifts.
    pub shifts: Vec<Shift>,
}

/// Response for the frozen-schedule-by-date view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrozenScheduleResponse {
    /// The snapshot's assembled schedule.
    pub schedule: ScheduleView,
    /// When the snapshot was taken (RFC 3339, UTC).
    pub frozen_at: String,
    /// Always true: marks the payload as frozen data rather than a live
    /// computation.
    pub is_frozen: bool,
}

/// Response for a freeze trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeResponse {
    /// The frozen date (`YYYY-MM-DD`).
    pub date: String,
    /// Whether a new snapshot was written (false when the date was already
    /// frozen).
    pub frozen: bool,
    /// A human-readable outcome message.
    pub message: String,
}
