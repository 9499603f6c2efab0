// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ContractedHoursType, Department, DomainError, Porter, PorterType, Service, Shift,
    validate_day_of_week, validate_department, validate_porter, validate_service, validate_shift,
    validate_time_of_day,
};
use time::{Date, Month};

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

fn make_shift(days_on: i32, days_off: i32) -> Shift {
    Shift::new(
        String::from("Day A"),
        String::from("07:00"),
        String::from("19:00"),
        days_on,
        days_off,
        0,
        date(2025, Month::January, 1),
    )
}

fn make_porter() -> Porter {
    Porter::new(
        String::from("Sam Field"),
        None,
        PorterType::new("PORTER"),
        ContractedHoursType::new("SHIFT"),
        37.5,
        None,
        0,
        None,
        None,
        None,
        None,
        None,
        None,
    )
}

#[test]
fn test_valid_shift_passes() {
    assert!(validate_shift(&make_shift(4, 4)).is_ok());
}

#[test]
fn test_zero_days_on_rejected() {
    let result = validate_shift(&make_shift(0, 4));
    assert_eq!(
        result,
        Err(DomainError::InvalidCycleConfiguration {
            days_on: 0,
            days_off: 4
        })
    );
}

#[test]
fn test_zero_days_off_rejected() {
    // A zero-length off block would let the cycle length collapse when the
    // on block is also shrunk; both blocks must be at least one day.
    assert!(validate_shift(&make_shift(4, 0)).is_err());
}

#[test]
fn test_negative_cycle_blocks_rejected() {
    assert!(validate_shift(&make_shift(-1, 4)).is_err());
    assert!(validate_shift(&make_shift(4, -1)).is_err());
}

#[test]
fn test_empty_shift_name_rejected() {
    let mut shift: Shift = make_shift(4, 4);
    shift.name = String::new();
    assert!(matches!(validate_shift(&shift), Err(DomainError::InvalidName(_))));
}

#[test]
fn test_bad_shift_times_rejected() {
    let mut shift: Shift = make_shift(4, 4);
    shift.starts_at = String::from("7am");
    assert!(matches!(
        validate_shift(&shift),
        Err(DomainError::InvalidTimeOfDay(_))
    ));
}

#[test]
fn test_time_of_day_accepts_24_hour_clock() {
    assert!(validate_time_of_day("00:00").is_ok());
    assert!(validate_time_of_day("23:59").is_ok());
    assert!(validate_time_of_day("07:00").is_ok());
    assert!(validate_time_of_day("24:00").is_err());
    assert!(validate_time_of_day("12:60").is_err());
    assert!(validate_time_of_day("noon").is_err());
}

#[test]
fn test_day_of_week_range() {
    for day in 0..=6 {
        assert!(validate_day_of_week(day).is_ok());
    }
    assert_eq!(
        validate_day_of_week(7),
        Err(DomainError::InvalidDayOfWeek { day: 7 })
    );
    assert!(validate_day_of_week(-1).is_err());
}

#[test]
fn test_conflicting_regular_location_rejected() {
    let mut porter: Porter = make_porter();
    porter.regular_department_id = Some(1);
    porter.regular_service_id = Some(2);
    assert!(matches!(
        validate_porter(&porter),
        Err(DomainError::ConflictingRegularLocation { .. })
    ));
}

#[test]
fn test_conflicting_temp_location_rejected() {
    let mut porter: Porter = make_porter();
    porter.temp_department_id = Some(1);
    porter.temp_service_id = Some(2);
    assert!(matches!(
        validate_porter(&porter),
        Err(DomainError::ConflictingTempLocation { .. })
    ));
}

#[test]
fn test_inverted_temp_window_rejected() {
    let mut porter: Porter = make_porter();
    porter.temp_department_id = Some(1);
    porter.temp_assignment_start = Some(date(2025, Month::April, 10));
    porter.temp_assignment_end = Some(date(2025, Month::April, 1));
    assert!(matches!(
        validate_porter(&porter),
        Err(DomainError::InvalidTempAssignmentWindow { .. })
    ));
}

#[test]
fn test_single_day_temp_window_accepted() {
    let mut porter: Porter = make_porter();
    porter.temp_department_id = Some(1);
    porter.temp_assignment_start = Some(date(2025, Month::April, 10));
    porter.temp_assignment_end = Some(date(2025, Month::April, 10));
    assert!(validate_porter(&porter).is_ok());
}

#[test]
fn test_department_requires_positive_coverage() {
    let department: Department = Department::new(String::from("Radiology"), true, 0, 1);
    assert_eq!(
        validate_department(&department),
        Err(DomainError::InvalidPortersRequired { count: 0 })
    );
}

#[test]
fn test_service_requires_positive_coverage() {
    let service: Service = Service::new(String::from("Mail Room"), false, 1, 0);
    assert!(validate_service(&service).is_err());
}

#[test]
fn test_valid_department_and_service_pass() {
    assert!(validate_department(&Department::new(String::from("Radiology"), true, 2, 1)).is_ok());
    assert!(validate_service(&Service::new(String::from("Mail Room"), false, 1, 1)).is_ok());
}
