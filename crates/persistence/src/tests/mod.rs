// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod entity_tests;
mod freeze_tests;

use rotascope_domain::{ContractedHoursType, Department, Porter, PorterType, Service, Shift};
use time::{Date, Month};

use crate::Persistence;

pub fn setup_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn make_department(name: &str) -> Department {
    Department::new(String::from(name), true, 2, 1)
}

pub fn make_service(name: &str) -> Service {
    Service::new(String::from(name), false, 1, 1)
}

pub fn make_shift(name: &str, days_on: i32, days_off: i32, ground_zero: Date) -> Shift {
    Shift::new(
        String::from(name),
        String::from("07:00"),
        String::from("19:00"),
        days_on,
        days_off,
        0,
        ground_zero,
    )
}

pub fn make_porter(name: &str, shift_id: Option<i64>, department_id: Option<i64>) -> Porter {
    Porter::new(
        String::from(name),
        None,
        PorterType::new("PORTER"),
        ContractedHoursType::new("SHIFT"),
        37.5,
        shift_id,
        0,
        department_id,
        None,
        None,
        None,
        None,
        None,
    )
}
