// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod availability;
mod error;
mod schedule;
mod shift_cycle;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AssignmentLocation, AssignmentType, AvailabilityContext, AvailabilityRecord, AvailabilityType,
    LocationType, ShiftInfo, resolve_availability,
};
pub use error::DomainError;
pub use schedule::{AssignedPorter, ScheduleView, ShiftRoster, assemble_schedule};
pub use shift_cycle::{cycle_position, is_porter_active_on_shift, is_shift_active};
pub use types::{
    ContractedHoursType, Department, Porter, PorterHours, PorterType, Service, Shift, WorkingHours,
    format_date, parse_date, serde_date,
};
pub use validation::{
    validate_day_of_week, validate_department, validate_porter, validate_service, validate_shift,
    validate_time_of_day,
};
