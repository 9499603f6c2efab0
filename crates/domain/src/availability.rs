// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Porter availability resolution.
//!
//! Resolves the single highest-priority availability record for a porter on
//! a date. The priority order is expressed as an ordered list of candidate
//! rules, evaluated top to bottom; the first rule producing a record wins:
//!
//! 1. Temporary assignment (inclusive date window)
//! 2. Shift assignment (porter-level cycle check)
//! 3. Custom hours (per-day working window)
//! 4. Default regular assignment
//!
//! A porter matching no rule is simply unavailable — that is a normal
//! outcome, not an error. Dangling references (a `shift_id` or location id
//! with no corresponding record) make the individual rule not match and
//! evaluation continues with the next rule.

use crate::shift_cycle::is_porter_active_on_shift;
use crate::types::{Department, Porter, PorterHours, Service, Shift, WorkingHours};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::Date;

/// How a porter came to be assigned to a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentType {
    /// The porter's permanent posting.
    #[serde(rename = "REGULAR")]
    Regular,
    /// A temporary override window.
    #[serde(rename = "TEMPORARY")]
    Temporary,
}

impl AssignmentType {
    /// Returns the string representation of this assignment type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Temporary => "TEMPORARY",
        }
    }
}

impl std::fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which rule produced an availability record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityType {
    /// The porter is on a working day of their rotating shift.
    #[serde(rename = "SHIFT")]
    Shift,
    /// The porter works a custom per-day window today.
    #[serde(rename = "CUSTOM_HOURS")]
    CustomHours,
    /// The porter has a standing assignment with no explicit hours.
    #[serde(rename = "REGULAR_ASSIGNMENT")]
    RegularAssignment,
}

impl AvailabilityType {
    /// Returns the string representation of this availability type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shift => "SHIFT",
            Self::CustomHours => "CUSTOM_HOURS",
            Self::RegularAssignment => "REGULAR_ASSIGNMENT",
        }
    }
}

impl std::fmt::Display for AvailabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of location a porter is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    /// A department.
    #[serde(rename = "DEPARTMENT")]
    Department,
    /// A service.
    #[serde(rename = "SERVICE")]
    Service,
}

impl LocationType {
    /// Returns the string representation of this location type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "DEPARTMENT",
            Self::Service => "SERVICE",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved location a porter works at on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentLocation {
    /// Whether this is a department or a service.
    #[serde(rename = "type")]
    pub location_type: LocationType,
    /// The location's identifier.
    pub location_id: i64,
    /// The location's name.
    pub name: String,
    /// Whether the assignment is the permanent posting or a temporary
    /// override.
    pub assignment_type: AssignmentType,
}

/// Summary of the shift that produced a shift-based availability record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInfo {
    /// The shift's identifier.
    pub shift_id: i64,
    /// The shift's name.
    pub shift_name: String,
}

/// The single best-priority availability of a porter on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// The porter's identifier.
    pub porter_id: i64,
    /// The porter's name.
    pub porter_name: String,
    /// Which rule produced the record.
    pub availability_type: AvailabilityType,
    /// Always true for an emitted record: a record means the porter works
    /// somewhere on this date.
    pub is_working_today: bool,
    /// The working window, when the matched rule defines one (shift hours
    /// or custom hours).
    pub working_hours: Option<WorkingHours>,
    /// The resolved location.
    pub assignment_location: AssignmentLocation,
    /// The owning shift, for shift-based records.
    pub shift_info: Option<ShiftInfo>,
}

/// Lookup tables the resolver needs alongside the porter record.
///
/// All maps are keyed by entity id. `custom_hours` maps a porter id to all
/// of that porter's per-day windows; the resolver selects the entry for the
/// requested day of week.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityContext<'a> {
    /// Active shifts by id.
    pub shifts: &'a HashMap<i64, Shift>,
    /// Active departments by id.
    pub departments: &'a HashMap<i64, Department>,
    /// Active services by id.
    pub services: &'a HashMap<i64, Service>,
    /// Custom working windows by porter id.
    pub custom_hours: &'a HashMap<i64, Vec<PorterHours>>,
}

/// A single candidate rule in the priority chain.
type Rule = fn(&Porter, Date, u8, &AvailabilityContext<'_>) -> Option<AvailabilityRecord>;

/// The priority chain, highest priority first.
const RULES: &[Rule] = &[
    temporary_assignment_rule,
    shift_assignment_rule,
    custom_hours_rule,
    regular_assignment_rule,
];

/// Resolves the highest-priority availability record for a porter.
///
/// # Arguments
///
/// * `porter` - The porter to resolve
/// * `target_date` - The date to resolve for (day granularity)
/// * `day_of_week` - The target date's day of week (0 = Sunday)
/// * `context` - Entity lookup tables
///
/// # Returns
///
/// The first matching rule's record, or `None` when the porter is not
/// available on this date.
#[must_use]
pub fn resolve_availability(
    porter: &Porter,
    target_date: Date,
    day_of_week: u8,
    context: &AvailabilityContext<'_>,
) -> Option<AvailabilityRecord> {
    RULES
        .iter()
        .find_map(|rule| rule(porter, target_date, day_of_week, context))
}

/// Builds a record for `porter` at the given location.
#[allow(clippy::too_many_arguments)]
fn build_record(
    porter: &Porter,
    location_type: LocationType,
    location_id: i64,
    location_name: String,
    assignment_type: AssignmentType,
    availability_type: AvailabilityType,
    working_hours: Option<WorkingHours>,
    shift_info: Option<ShiftInfo>,
) -> Option<AvailabilityRecord> {
    Some(AvailabilityRecord {
        porter_id: porter.porter_id?,
        porter_name: porter.name.clone(),
        availability_type,
        is_working_today: true,
        working_hours,
        assignment_location: AssignmentLocation {
            location_type,
            location_id,
            name: location_name,
            assignment_type,
        },
        shift_info,
    })
}

/// Rule 1: a temporary assignment window covering the target date.
///
/// The department is checked before the service. A temporary record keeps
/// the default availability type; only the assignment type marks it as an
/// override.
fn temporary_assignment_rule(
    porter: &Porter,
    target_date: Date,
    _day_of_week: u8,
    context: &AvailabilityContext<'_>,
) -> Option<AvailabilityRecord> {
    if !porter.has_temp_assignment_on(target_date) {
        return None;
    }
    if let Some(department_id) = porter.temp_department_id {
        if let Some(department) = context.departments.get(&department_id) {
            return build_record(
                porter,
                LocationType::Department,
                department_id,
                department.name.clone(),
                AssignmentType::Temporary,
                AvailabilityType::RegularAssignment,
                None,
                None,
            );
        }
    }
    if let Some(service_id) = porter.temp_service_id {
        if let Some(service) = context.services.get(&service_id) {
            return build_record(
                porter,
                LocationType::Service,
                service_id,
                service.name.clone(),
                AssignmentType::Temporary,
                AvailabilityType::RegularAssignment,
                None,
                None,
            );
        }
    }
    None
}

/// Rule 2: the porter is on a working day of their rotating shift.
///
/// Working hours come from the shift; the location is the porter's regular
/// posting (department before service).
fn shift_assignment_rule(
    porter: &Porter,
    target_date: Date,
    _day_of_week: u8,
    context: &AvailabilityContext<'_>,
) -> Option<AvailabilityRecord> {
    let shift_id: i64 = porter.shift_id?;
    let shift: &Shift = context.shifts.get(&shift_id)?;
    if !is_porter_active_on_shift(target_date, porter, shift) {
        return None;
    }
    let shift_info: ShiftInfo = ShiftInfo {
        shift_id,
        shift_name: shift.name.clone(),
    };
    if let Some(department_id) = porter.regular_department_id {
        if let Some(department) = context.departments.get(&department_id) {
            return build_record(
                porter,
                LocationType::Department,
                department_id,
                department.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::Shift,
                Some(shift.working_hours()),
                Some(shift_info),
            );
        }
    }
    if let Some(service_id) = porter.regular_service_id {
        if let Some(service) = context.services.get(&service_id) {
            return build_record(
                porter,
                LocationType::Service,
                service_id,
                service.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::Shift,
                Some(shift.working_hours()),
                Some(shift_info),
            );
        }
    }
    None
}

/// Rule 3: a custom per-day working window for the target day of week.
///
/// Only applies to porters whose contracted-hours classification is
/// `CUSTOM`.
fn custom_hours_rule(
    porter: &Porter,
    _target_date: Date,
    day_of_week: u8,
    context: &AvailabilityContext<'_>,
) -> Option<AvailabilityRecord> {
    if !porter.contracted_hours_type.is_custom() {
        return None;
    }
    let porter_id: i64 = porter.porter_id?;
    let hours: WorkingHours = context
        .custom_hours
        .get(&porter_id)?
        .iter()
        .find(|entry| entry.day_of_week == day_of_week)
        .map(PorterHours::working_hours)?;
    if let Some(department_id) = porter.regular_department_id {
        if let Some(department) = context.departments.get(&department_id) {
            return build_record(
                porter,
                LocationType::Department,
                department_id,
                department.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::CustomHours,
                Some(hours),
                None,
            );
        }
    }
    if let Some(service_id) = porter.regular_service_id {
        if let Some(service) = context.services.get(&service_id) {
            return build_record(
                porter,
                LocationType::Service,
                service_id,
                service.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::CustomHours,
                Some(hours),
                None,
            );
        }
    }
    None
}

/// Rule 4: a standing regular assignment with no explicit hours.
///
/// Covers 24/7 postings without a shift pattern.
fn regular_assignment_rule(
    porter: &Porter,
    _target_date: Date,
    _day_of_week: u8,
    context: &AvailabilityContext<'_>,
) -> Option<AvailabilityRecord> {
    if let Some(department_id) = porter.regular_department_id {
        if let Some(department) = context.departments.get(&department_id) {
            return build_record(
                porter,
                LocationType::Department,
                department_id,
                department.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::RegularAssignment,
                None,
                None,
            );
        }
    }
    if let Some(service_id) = porter.regular_service_id {
        if let Some(service) = context.services.get(&service_id) {
            return build_record(
                porter,
                LocationType::Service,
                service_id,
                service.name.clone(),
                AssignmentType::Regular,
                AvailabilityType::RegularAssignment,
                None,
                None,
            );
        }
    }
    None
}
