// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Rotascope porter tracking system.
//!
//! Handlers validate incoming data, call the domain engine and the
//! persistence layer, and translate lower-layer errors into the API error
//! contract. Domain and persistence errors never leak to HTTP callers
//! untranslated.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    create_department, create_porter, create_service, create_shift, deactivate_department,
    deactivate_porter, deactivate_service, deactivate_shift, freeze_date, get_availability,
    get_frozen_schedule, get_porter_hours, get_schedule, list_active_shifts, list_departments,
    list_porters, list_services, list_shifts, replace_porter_hours,
};
pub use request_response::{
    ActiveShiftsResponse, AvailabilityResponse, CreateDepartmentRequest, CreatePorterRequest,
    CreateServiceRequest, CreateShiftRequest, CreatedResponse, FreezeResponse,
    FrozenScheduleResponse, PorterHoursEntry, ReplacePorterHoursRequest,
};
