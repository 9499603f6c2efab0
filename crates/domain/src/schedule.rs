// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Composite schedule assembly.
//!
//! Builds the per-date "active shifts with assigned porters" view shared by
//! the live schedule endpoint and the freeze job. Unlike the availability
//! resolver, this view reports every porter nominally assigned to an active
//! shift — including those on an off day — with raw activity and temporary
//! override flags, because consumers need the full roster rather than a
//! single resolved location per porter. The two views are deliberately kept
//! separate.

use crate::shift_cycle::{is_porter_active_on_shift, is_shift_active};
use crate::types::{Department, Porter, Service, Shift, serde_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// One porter's entry in an active shift's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedPorter {
    /// The porter record.
    pub porter: Porter,
    /// Whether the porter's personal cycle has them working on this date.
    pub is_active_today: bool,
    /// Whether a temporary assignment window covers this date.
    pub is_temporarily_assigned: bool,
    /// The temporary location's name, when temporarily assigned and the
    /// location still resolves.
    pub temp_assignment_location: Option<String>,
}

/// An active shift together with its full porter roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRoster {
    /// The shift record.
    pub shift: Shift,
    /// Every porter assigned to the shift, active or not.
    pub assigned_porters: Vec<AssignedPorter>,
    /// Always true: only active shifts appear in the view.
    pub is_active_today: bool,
}

/// The composite schedule for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    /// The date the view was computed for.
    #[serde(with = "serde_date")]
    pub date: Date,
    /// All active departments.
    pub departments: Vec<Department>,
    /// All active services.
    pub services: Vec<Service>,
    /// Active shifts with their rosters.
    pub active_shifts: Vec<ShiftRoster>,
}

/// Returns whether `porter` is assigned to `shift`.
fn is_assigned_to(porter: &Porter, shift: &Shift) -> bool {
    shift.shift_id.is_some() && porter.shift_id == shift.shift_id
}

/// Resolves the name of a porter's temporary location.
///
/// The temporary department is preferred over the temporary service. A
/// dangling id resolves to `None`.
fn temp_location_name(
    porter: &Porter,
    departments: &[Department],
    services: &[Service],
) -> Option<String> {
    if let Some(department_id) = porter.temp_department_id {
        let name: Option<String> = departments
            .iter()
            .find(|d| d.department_id == Some(department_id))
            .map(|d| d.name.clone());
        if name.is_some() {
            return name;
        }
    }
    porter.temp_service_id.and_then(|service_id| {
        services
            .iter()
            .find(|s| s.service_id == Some(service_id))
            .map(|s| s.name.clone())
    })
}

/// Assembles the composite schedule view for a date.
///
/// Shifts are filtered to those active on `target_date`; each active shift
/// carries its complete roster of assigned porters with per-porter activity
/// and temporary override flags. The department and service lists are
/// carried through for consumers that render coverage alongside the rosters.
///
/// # Arguments
///
/// * `target_date` - The date to assemble for (day granularity)
/// * `departments` - All active departments
/// * `services` - All active services
/// * `shifts` - All active shifts
/// * `porters` - All active porters
#[must_use]
pub fn assemble_schedule(
    target_date: Date,
    departments: Vec<Department>,
    services: Vec<Service>,
    shifts: &[Shift],
    porters: &[Porter],
) -> ScheduleView {
    let active_shifts: Vec<ShiftRoster> = shifts
        .iter()
        .filter(|shift| is_shift_active(target_date, shift))
        .map(|shift| {
            let assigned_porters: Vec<AssignedPorter> = porters
                .iter()
                .filter(|porter| is_assigned_to(porter, shift))
                .map(|porter| {
                    let is_temporarily_assigned: bool = porter.has_temp_assignment_on(target_date);
                    let temp_assignment_location: Option<String> = if is_temporarily_assigned {
                        temp_location_name(porter, &departments, &services)
                    } else {
                        None
                    };
                    AssignedPorter {
                        porter: porter.clone(),
                        is_active_today: is_porter_active_on_shift(target_date, porter, shift),
                        is_temporarily_assigned,
                        temp_assignment_location,
                    }
                })
                .collect();
            ShiftRoster {
                shift: shift.clone(),
                assigned_porters,
                is_active_today: true,
            }
        })
        .collect();

    ScheduleView {
        date: target_date,
        departments,
        services,
        active_shifts,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{ContractedHoursType, PorterType};
    use time::{Date, Month};

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    fn make_department(id: i64, name: &str) -> Department {
        let mut department: Department = Department::new(String::from(name), true, 2, 1);
        department.department_id = Some(id);
        department
    }

    fn make_service(id: i64, name: &str) -> Service {
        let mut service: Service = Service::new(String::from(name), false, 1, 1);
        service.service_id = Some(id);
        service
    }

    fn make_shift(id: i64, days_on: i32, days_off: i32, ground_zero: Date) -> Shift {
        let mut shift: Shift = Shift::new(
            format!("Shift {id}"),
            String::from("07:00"),
            String::from("19:00"),
            days_on,
            days_off,
            0,
            ground_zero,
        );
        shift.shift_id = Some(id);
        shift
    }

    fn make_porter(id: i64, shift_id: Option<i64>, porter_offset: i32) -> Porter {
        let mut porter: Porter = Porter::new(
            format!("Porter {id}"),
            None,
            PorterType::new("PORTER"),
            ContractedHoursType::new("SHIFT"),
            37.5,
            shift_id,
            porter_offset,
            Some(5),
            None,
            None,
            None,
            None,
            None,
        );
        porter.porter_id = Some(id);
        porter
    }

    #[test]
    fn test_only_active_shifts_appear() {
        let ground_zero: Date = date(2025, Month::January, 1);
        let on_shift: Shift = make_shift(1, 4, 4, ground_zero);
        // Offset ground zero so this shift is off on the target date
        let off_shift: Shift = make_shift(2, 4, 4, date(2024, Month::December, 28));

        let view: ScheduleView = assemble_schedule(
            date(2025, Month::January, 2),
            vec![make_department(5, "Radiology")],
            vec![],
            &[on_shift, off_shift],
            &[],
        );

        assert_eq!(view.active_shifts.len(), 1);
        assert_eq!(view.active_shifts[0].shift.shift_id, Some(1));
        assert!(view.active_shifts[0].is_active_today);
    }

    #[test]
    fn test_roster_contains_all_assigned_porters_with_activity_flags() {
        let ground_zero: Date = date(2025, Month::January, 1);
        let shift: Shift = make_shift(1, 4, 4, ground_zero);
        let on_cycle: Porter = make_porter(1, Some(1), 0);
        let off_cycle: Porter = make_porter(2, Some(1), 4);
        let other_shift: Porter = make_porter(3, Some(2), 0);
        let unassigned: Porter = make_porter(4, None, 0);

        let view: ScheduleView = assemble_schedule(
            date(2025, Month::January, 2),
            vec![make_department(5, "Radiology")],
            vec![],
            &[shift],
            &[on_cycle, off_cycle, other_shift, unassigned],
        );

        let roster = &view.active_shifts[0].assigned_porters;
        assert_eq!(roster.len(), 2);
        assert!(roster[0].is_active_today);
        assert!(!roster[1].is_active_today);
    }

    #[test]
    fn test_temp_override_flags_and_location_name() {
        let ground_zero: Date = date(2025, Month::January, 1);
        let shift: Shift = make_shift(1, 4, 4, ground_zero);
        let mut porter: Porter = make_porter(1, Some(1), 0);
        porter.temp_service_id = Some(9);
        porter.temp_assignment_start = Some(date(2025, Month::January, 1));
        porter.temp_assignment_end = Some(date(2025, Month::January, 3));

        let view: ScheduleView = assemble_schedule(
            date(2025, Month::January, 2),
            vec![make_department(5, "Radiology")],
            vec![make_service(9, "Mail Room")],
            std::slice::from_ref(&shift),
            std::slice::from_ref(&porter),
        );

        let entry = &view.active_shifts[0].assigned_porters[0];
        assert!(entry.is_temporarily_assigned);
        assert_eq!(entry.temp_assignment_location.as_deref(), Some("Mail Room"));

        // Outside the window the flags reset
        let later: ScheduleView = assemble_schedule(
            date(2025, Month::January, 4),
            vec![make_department(5, "Radiology")],
            vec![make_service(9, "Mail Room")],
            std::slice::from_ref(&shift),
            std::slice::from_ref(&porter),
        );
        let entry = &later.active_shifts[0].assigned_porters[0];
        assert!(!entry.is_temporarily_assigned);
        assert!(entry.temp_assignment_location.is_none());
    }

    #[test]
    fn test_end_to_end_schedule_example() {
        // Shift 07:00-19:00, 4 on 4 off, ground zero 2025-01-01; porter with
        // offset 0 assigned to department 5.
        let shift: Shift = make_shift(1, 4, 4, date(2025, Month::January, 1));
        let porter: Porter = make_porter(1, Some(1), 0);
        let departments: Vec<Department> = vec![make_department(5, "Radiology")];

        let on_day: ScheduleView = assemble_schedule(
            date(2025, Month::January, 3),
            departments.clone(),
            vec![],
            std::slice::from_ref(&shift),
            std::slice::from_ref(&porter),
        );
        assert_eq!(on_day.active_shifts.len(), 1);
        let entry = &on_day.active_shifts[0].assigned_porters[0];
        assert!(entry.is_active_today);
        assert_eq!(entry.porter.regular_department_id, Some(5));
        assert_eq!(on_day.active_shifts[0].shift.starts_at, "07:00");
        assert_eq!(on_day.active_shifts[0].shift.ends_at, "19:00");

        // 2025-01-06 is an off day for both the shift and the porter
        let off_day: ScheduleView = assemble_schedule(
            date(2025, Month::January, 6),
            departments,
            vec![],
            std::slice::from_ref(&shift),
            std::slice::from_ref(&porter),
        );
        assert!(off_day.active_shifts.is_empty());
    }

    #[test]
    fn test_view_serializes_dates_in_canonical_format() {
        let view: ScheduleView = assemble_schedule(
            date(2025, Month::January, 3),
            vec![],
            vec![],
            &[],
            &[],
        );

        let json: String = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"date\":\"2025-01-03\""));

        let parsed: ScheduleView = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.date, view.date);
    }
}
