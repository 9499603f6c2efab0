// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rotascope_domain::{Department, Porter, PorterHours, Service, Shift};
use time::Month;

use super::{date, make_department, make_porter, make_service, make_shift, setup_persistence};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_and_list_departments() {
    let mut persistence: Persistence = setup_persistence();

    persistence
        .create_department(&make_department("Radiology"))
        .unwrap();
    persistence
        .create_department(&make_department("Pharmacy"))
        .unwrap();

    let departments: Vec<Department> = persistence.list_departments().unwrap();
    assert_eq!(departments.len(), 2);
    // Ordered by name
    assert_eq!(departments[0].name, "Pharmacy");
    assert_eq!(departments[1].name, "Radiology");
    assert!(departments[0].department_id.is_some());
}

#[test]
fn test_deactivated_department_disappears_from_listing() {
    let mut persistence: Persistence = setup_persistence();
    let department_id: i64 = persistence
        .create_department(&make_department("Radiology"))
        .unwrap();

    persistence.deactivate_department(department_id).unwrap();

    assert!(persistence.list_departments().unwrap().is_empty());
    // A second deactivation finds nothing
    assert!(matches!(
        persistence.deactivate_department(department_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_create_and_list_services() {
    let mut persistence: Persistence = setup_persistence();

    let service_id: i64 = persistence.create_service(&make_service("Mail Room")).unwrap();
    let services: Vec<Service> = persistence.list_services().unwrap();

    assert_eq!(services.len(), 1);
    assert_eq!(services[0].service_id, Some(service_id));
    assert_eq!(services[0].name, "Mail Room");
    assert!(!services[0].is_24_7);
}

#[test]
fn test_shift_round_trips_ground_zero_date() {
    let mut persistence: Persistence = setup_persistence();
    let ground_zero = date(2025, Month::January, 1);

    persistence
        .create_shift(&make_shift("Day A", 4, 4, ground_zero))
        .unwrap();

    let shifts: Vec<Shift> = persistence.list_shifts().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].ground_zero_date, ground_zero);
    assert_eq!(shifts[0].days_on, 4);
    assert_eq!(shifts[0].days_off, 4);
    assert_eq!(shifts[0].starts_at, "07:00");
}

#[test]
fn test_porter_round_trips_temp_assignment_window() {
    let mut persistence: Persistence = setup_persistence();
    let department_id: i64 = persistence
        .create_department(&make_department("Radiology"))
        .unwrap();

    let mut porter: Porter = make_porter("Sam Field", None, None);
    porter.temp_department_id = Some(department_id);
    porter.temp_assignment_start = Some(date(2025, Month::April, 1));
    porter.temp_assignment_end = Some(date(2025, Month::April, 5));
    persistence.create_porter(&porter).unwrap();

    let porters: Vec<Porter> = persistence.list_porters().unwrap();
    assert_eq!(porters.len(), 1);
    assert_eq!(porters[0].temp_department_id, Some(department_id));
    assert_eq!(
        porters[0].temp_assignment_start,
        Some(date(2025, Month::April, 1))
    );
    assert_eq!(
        porters[0].temp_assignment_end,
        Some(date(2025, Month::April, 5))
    );
}

#[test]
fn test_porter_with_dangling_shift_reference_rejected() {
    let mut persistence: Persistence = setup_persistence();

    let result = persistence.create_porter(&make_porter("Sam Field", Some(999), None));

    // Foreign key enforcement rejects the insert
    assert!(result.is_err());
}

#[test]
fn test_deactivated_porter_disappears_from_listing() {
    let mut persistence: Persistence = setup_persistence();
    let porter_id: i64 = persistence
        .create_porter(&make_porter("Sam Field", None, None))
        .unwrap();

    persistence.deactivate_porter(porter_id).unwrap();

    assert!(persistence.list_porters().unwrap().is_empty());
}

#[test]
fn test_replace_porter_hours_is_last_write_wins() {
    let mut persistence: Persistence = setup_persistence();
    let porter_id: i64 = persistence
        .create_porter(&make_porter("Sam Field", None, None))
        .unwrap();

    let first: Vec<PorterHours> = vec![
        PorterHours::new(porter_id, 1, String::from("08:00"), String::from("16:00")),
        PorterHours::new(porter_id, 2, String::from("08:00"), String::from("16:00")),
        PorterHours::new(porter_id, 3, String::from("08:00"), String::from("16:00")),
    ];
    persistence.replace_porter_hours(porter_id, &first).unwrap();

    let second: Vec<PorterHours> = vec![PorterHours::new(
        porter_id,
        5,
        String::from("10:00"),
        String::from("14:00"),
    )];
    persistence.replace_porter_hours(porter_id, &second).unwrap();

    let stored: Vec<PorterHours> = persistence.porter_hours(porter_id).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].day_of_week, 5);
    assert_eq!(stored[0].starts_at, "10:00");
}

#[test]
fn test_replace_hours_for_missing_porter_not_found() {
    let mut persistence: Persistence = setup_persistence();

    let result = persistence.replace_porter_hours(
        42,
        &[PorterHours::new(42, 1, String::from("08:00"), String::from("16:00"))],
    );

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_porter_hours_for_missing_porter_not_found() {
    let mut persistence: Persistence = setup_persistence();

    assert!(matches!(
        persistence.porter_hours(42),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_all_porter_hours_spans_porters() {
    let mut persistence: Persistence = setup_persistence();
    let first: i64 = persistence
        .create_porter(&make_porter("Sam Field", None, None))
        .unwrap();
    let second: i64 = persistence
        .create_porter(&make_porter("Ash Reed", None, None))
        .unwrap();

    persistence
        .replace_porter_hours(
            first,
            &[PorterHours::new(first, 1, String::from("08:00"), String::from("16:00"))],
        )
        .unwrap();
    persistence
        .replace_porter_hours(
            second,
            &[
                PorterHours::new(second, 2, String::from("09:00"), String::from("17:00")),
                PorterHours::new(second, 3, String::from("09:00"), String::from("17:00")),
            ],
        )
        .unwrap();

    let all: Vec<PorterHours> = persistence.all_porter_hours().unwrap();
    assert_eq!(all.len(), 3);
}
