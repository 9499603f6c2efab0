// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    departments (department_id) {
        department_id -> BigInt,
        name -> Text,
        is_24_7 -> Integer,
        porters_required_day -> Integer,
        porters_required_night -> Integer,
        is_active -> Integer,
    }
}

diesel::table! {
    services (service_id) {
        service_id -> BigInt,
        name -> Text,
        is_24_7 -> Integer,
        porters_required_day -> Integer,
        porters_required_night -> Integer,
        is_active -> Integer,
    }
}

diesel::table! {
    shifts (shift_id) {
        shift_id -> BigInt,
        name -> Text,
        starts_at -> Text,
        ends_at -> Text,
        days_on -> Integer,
        days_off -> Integer,
        shift_offset -> Integer,
        ground_zero_date -> Text,
        is_active -> Integer,
    }
}

diesel::table! {
    porters (porter_id) {
        porter_id -> BigInt,
        name -> Text,
        email -> Nullable<Text>,
        porter_type -> Text,
        contracted_hours_type -> Text,
        weekly_contracted_hours -> Double,
        shift_id -> Nullable<BigInt>,
        porter_offset -> Integer,
        regular_department_id -> Nullable<BigInt>,
        regular_service_id -> Nullable<BigInt>,
        temp_department_id -> Nullable<BigInt>,
        temp_service_id -> Nullable<BigInt>,
        temp_assignment_start -> Nullable<Text>,
        temp_assignment_end -> Nullable<Text>,
        is_active -> Integer,
    }
}

diesel::table! {
    porter_hours (porter_hours_id) {
        porter_hours_id -> BigInt,
        porter_id -> BigInt,
        day_of_week -> Integer,
        starts_at -> Text,
        ends_at -> Text,
    }
}

diesel::table! {
    frozen_schedules (frozen_schedule_id) {
        frozen_schedule_id -> BigInt,
        date -> Text,
        schedule_data -> Text,
        frozen_at -> Text,
    }
}

diesel::table! {
    frozen_porter_assignments (frozen_porter_assignment_id) {
        frozen_porter_assignment_id -> BigInt,
        frozen_schedule_id -> BigInt,
        porter_id -> BigInt,
        shift_id -> BigInt,
        is_active_today -> Integer,
        is_temporarily_assigned -> Integer,
        temp_assignment_location -> Nullable<Text>,
    }
}

diesel::joinable!(porters -> shifts (shift_id));
diesel::joinable!(porter_hours -> porters (porter_id));
diesel::joinable!(frozen_porter_assignments -> frozen_schedules (frozen_schedule_id));
diesel::joinable!(frozen_porter_assignments -> porters (porter_id));
diesel::joinable!(frozen_porter_assignments -> shifts (shift_id));

diesel::allow_tables_to_appear_in_same_query!(
    departments,
    services,
    shifts,
    porters,
    porter_hours,
    frozen_schedules,
    frozen_porter_assignments,
);
