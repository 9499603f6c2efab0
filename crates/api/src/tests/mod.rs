// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use rotascope_persistence::Persistence;

use crate::request_response::{
    CreateDepartmentRequest, CreatePorterRequest, CreateServiceRequest, CreateShiftRequest,
};

pub fn setup_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn department_request(name: &str) -> CreateDepartmentRequest {
    CreateDepartmentRequest {
        name: String::from(name),
        is_24_7: true,
        porters_required_day: 2,
        porters_required_night: 1,
    }
}

pub fn service_request(name: &str) -> CreateServiceRequest {
    CreateServiceRequest {
        name: String::from(name),
        is_24_7: false,
        porters_required_day: 1,
        porters_required_night: 1,
    }
}

pub fn shift_request(name: &str, ground_zero: &str) -> CreateShiftRequest {
    CreateShiftRequest {
        name: String::from(name),
        starts_at: String::from("07:00"),
        ends_at: String::from("19:00"),
        days_on: 4,
        days_off: 4,
        shift_offset: 0,
        ground_zero_date: String::from(ground_zero),
    }
}

pub fn porter_request(name: &str) -> CreatePorterRequest {
    CreatePorterRequest {
        name: String::from(name),
        email: None,
        porter_type: String::from("PORTER"),
        contracted_hours_type: String::from("SHIFT"),
        weekly_contracted_hours: None,
        shift_id: None,
        porter_offset: 0,
        regular_department_id: None,
        regular_service_id: None,
        temp_department_id: None,
        temp_service_id: None,
        temp_assignment_start: None,
        temp_assignment_end: None,
    }
}
