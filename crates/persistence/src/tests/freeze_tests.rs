// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use rotascope_domain::{AssignedPorter, Porter, ScheduleView, Shift, ShiftRoster, format_date};
use time::Month;

use super::{date, make_department, make_porter, make_shift, setup_persistence};
use crate::data_models::{FrozenScheduleDocument, SNAPSHOT_SCHEMA_VERSION};
use crate::diesel_schema::frozen_schedules;
use crate::{FreezeOutcome, FrozenSnapshot, Persistence, PersistenceError};

/// Seeds a department, one 4-on-4-off shift starting 2025-01-01, and two
/// porters assigned to it. Returns (`shift_id`, porter ids).
fn seed_schedule_entities(persistence: &mut Persistence) -> (i64, Vec<i64>) {
    let department_id: i64 = persistence
        .create_department(&make_department("Radiology"))
        .unwrap();
    let shift_id: i64 = persistence
        .create_shift(&make_shift("Day A", 4, 4, date(2025, Month::January, 1)))
        .unwrap();
    let first: i64 = persistence
        .create_porter(&make_porter("Sam Field", Some(shift_id), Some(department_id)))
        .unwrap();
    let second: i64 = persistence
        .create_porter(&make_porter("Ash Reed", Some(shift_id), Some(department_id)))
        .unwrap();
    (shift_id, vec![first, second])
}

#[test]
fn test_freeze_creates_snapshot_with_assignment_rows() {
    let mut persistence: Persistence = setup_persistence();
    let (shift_id, porter_ids) = seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::January, 3);

    let outcome: FreezeOutcome = persistence.freeze_schedule(target).unwrap();

    let FreezeOutcome::Frozen(record) = outcome else {
        panic!("expected a new snapshot");
    };
    assert_eq!(record.date, target);

    let assignments = persistence.frozen_assignments(record.frozen_schedule_id).unwrap();
    assert_eq!(assignments.len(), porter_ids.len());
    for assignment in &assignments {
        assert_eq!(assignment.shift_id, shift_id);
        assert!(assignment.is_active_today);
        assert!(!assignment.is_temporarily_assigned);
    }
}

#[test]
fn test_freeze_same_date_twice_is_noop() {
    let mut persistence: Persistence = setup_persistence();
    seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::January, 3);

    let first: FreezeOutcome = persistence.freeze_schedule(target).unwrap();
    let second: FreezeOutcome = persistence.freeze_schedule(target).unwrap();

    assert!(first.was_frozen());
    assert_eq!(second, FreezeOutcome::AlreadyFrozen);

    let count: i64 =
        crate::queries::freeze::count_frozen_for_date(&mut persistence.conn, target).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_frozen_snapshot_round_trips_document() {
    let mut persistence: Persistence = setup_persistence();
    seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::January, 3);

    persistence.freeze_schedule(target).unwrap();
    let snapshot: FrozenSnapshot = persistence.get_frozen_schedule(target).unwrap();

    assert_eq!(snapshot.document.schema_version, SNAPSHOT_SCHEMA_VERSION);
    assert_eq!(snapshot.document.schedule.date, target);
    assert_eq!(snapshot.document.schedule.active_shifts.len(), 1);
    assert_eq!(
        snapshot.document.schedule.active_shifts[0].assigned_porters.len(),
        2
    );
    assert_eq!(snapshot.document.frozen_at, snapshot.record.frozen_at);
}

#[test]
fn test_freeze_off_day_produces_empty_roster() {
    let mut persistence: Persistence = setup_persistence();
    seed_schedule_entities(&mut persistence);
    // 2025-01-06 is an off day for the 4-on-4-off pattern
    let target = date(2025, Month::January, 6);

    let outcome: FreezeOutcome = persistence.freeze_schedule(target).unwrap();

    let FreezeOutcome::Frozen(record) = outcome else {
        panic!("expected a new snapshot");
    };
    let snapshot: FrozenSnapshot = persistence.get_frozen_schedule(target).unwrap();
    assert!(snapshot.document.schedule.active_shifts.is_empty());
    assert!(persistence.frozen_assignments(record.frozen_schedule_id).unwrap().is_empty());
}

#[test]
fn test_snapshot_is_immutable_against_later_entity_changes() {
    let mut persistence: Persistence = setup_persistence();
    let (_, porter_ids) = seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::January, 3);

    persistence.freeze_schedule(target).unwrap();
    // Entity changes after the freeze must not alter the snapshot
    persistence.deactivate_porter(porter_ids[0]).unwrap();

    let snapshot: FrozenSnapshot = persistence.get_frozen_schedule(target).unwrap();
    assert_eq!(
        snapshot.document.schedule.active_shifts[0].assigned_porters.len(),
        2
    );
}

#[test]
fn test_unknown_frozen_date_is_not_found() {
    let mut persistence: Persistence = setup_persistence();

    let result = persistence.get_frozen_schedule(date(2025, Month::January, 3));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_failed_assignment_insert_rolls_back_whole_snapshot() {
    let mut persistence: Persistence = setup_persistence();
    let (shift_id, porter_ids) = seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::February, 1);

    // A document whose roster references one real porter and then one that
    // does not exist: the first assignment insert succeeds, the second
    // violates the foreign key, and the transaction must roll back both the
    // schedule row and the already-inserted assignment row.
    let shifts: Vec<Shift> = persistence.list_shifts().unwrap();
    let porters: Vec<Porter> = persistence.list_porters().unwrap();
    let real_porter: Porter = porters
        .iter()
        .find(|p| p.porter_id == Some(porter_ids[0]))
        .cloned()
        .unwrap();
    let mut ghost_porter: Porter = real_porter.clone();
    ghost_porter.porter_id = Some(9999);

    let roster_entry = |porter: Porter| AssignedPorter {
        porter,
        is_active_today: true,
        is_temporarily_assigned: false,
        temp_assignment_location: None,
    };
    let document: FrozenScheduleDocument = FrozenScheduleDocument {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        frozen_at: String::from("2025-02-01T07:59:00Z"),
        schedule: ScheduleView {
            date: target,
            departments: vec![],
            services: vec![],
            active_shifts: vec![ShiftRoster {
                shift: shifts
                    .iter()
                    .find(|s| s.shift_id == Some(shift_id))
                    .cloned()
                    .unwrap(),
                assigned_porters: vec![roster_entry(real_porter), roster_entry(ghost_porter)],
                is_active_today: true,
            }],
        },
    };

    let date_text: String = format_date(target);
    let result = persistence
        .conn
        .transaction::<(i64, usize), PersistenceError, _>(|conn| {
            crate::mutations::freeze::insert_snapshot_rows(conn, &date_text, &document)
        });
    assert!(result.is_err());

    // Nothing persisted for the date
    let count: i64 =
        crate::queries::freeze::count_frozen_for_date(&mut persistence.conn, target).unwrap();
    assert_eq!(count, 0);
    assert!(!persistence.is_date_frozen(target).unwrap());
}

#[test]
fn test_unsupported_snapshot_version_rejected_on_read() {
    let mut persistence: Persistence = setup_persistence();
    seed_schedule_entities(&mut persistence);
    let target = date(2025, Month::March, 1);

    // Store a document stamped with a future schema version
    let document: FrozenScheduleDocument = FrozenScheduleDocument {
        schema_version: SNAPSHOT_SCHEMA_VERSION + 1,
        frozen_at: String::from("2025-03-01T07:59:00Z"),
        schedule: ScheduleView {
            date: target,
            departments: vec![],
            services: vec![],
            active_shifts: vec![],
        },
    };
    let payload: String = serde_json::to_string(&document).unwrap();
    diesel::insert_into(frozen_schedules::table)
        .values((
            frozen_schedules::date.eq(format_date(target)),
            frozen_schedules::schedule_data.eq(&payload),
            frozen_schedules::frozen_at.eq(&document.frozen_at),
        ))
        .execute(&mut persistence.conn)
        .unwrap();

    let result = persistence.get_frozen_schedule(target);

    assert!(matches!(
        result,
        Err(PersistenceError::SnapshotVersionMismatch {
            found,
            supported,
        }) if found == SNAPSHOT_SCHEMA_VERSION + 1 && supported == SNAPSHOT_SCHEMA_VERSION
    ));
}

#[test]
fn test_freeze_captures_temporary_assignment_location() {
    let mut persistence: Persistence = setup_persistence();
    let department_id: i64 = persistence
        .create_department(&make_department("Radiology"))
        .unwrap();
    let temp_department_id: i64 = persistence
        .create_department(&make_department("Pharmacy"))
        .unwrap();
    let shift_id: i64 = persistence
        .create_shift(&make_shift("Day A", 4, 4, date(2025, Month::January, 1)))
        .unwrap();
    let mut porter: Porter = make_porter("Sam Field", Some(shift_id), Some(department_id));
    porter.temp_department_id = Some(temp_department_id);
    porter.temp_assignment_start = Some(date(2025, Month::January, 1));
    porter.temp_assignment_end = Some(date(2025, Month::January, 7));
    persistence.create_porter(&porter).unwrap();

    let outcome: FreezeOutcome = persistence
        .freeze_schedule(date(2025, Month::January, 2))
        .unwrap();
    let FreezeOutcome::Frozen(record) = outcome else {
        panic!("expected a new snapshot");
    };

    let assignments = persistence.frozen_assignments(record.frozen_schedule_id).unwrap();
    assert_eq!(assignments.len(), 1);
    assert!(assignments[0].is_temporarily_assigned);
    assert_eq!(
        assignments[0].temp_assignment_location.as_deref(),
        Some("Pharmacy")
    );
}
