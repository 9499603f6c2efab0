// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The freeze transaction.
//!
//! Freezing persists an immutable point-in-time copy of the assembled
//! schedule for a date. The whole operation — idempotency check, entity
//! reads, assembly, the schedule row, and every per-assignment row — runs
//! inside one database transaction, so a failure anywhere leaves no partial
//! snapshot behind.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rotascope_domain::{ScheduleView, assemble_schedule, format_date};
use time::Date;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::data_models::{
    FreezeOutcome, FrozenScheduleDocument, FrozenScheduleRecord, SNAPSHOT_SCHEMA_VERSION,
};
use crate::diesel_schema::{frozen_porter_assignments, frozen_schedules};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Freezes the schedule for `target_date`.
///
/// Idempotent per date: when a snapshot already exists the call is a no-op
/// and returns [`FreezeOutcome::AlreadyFrozen`] without error. The existing
/// snapshot is never overwritten.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `target_date` - The date to freeze (day granularity)
///
/// # Errors
///
/// Returns an error if any read, serialization, or insert fails. The
/// transaction rolls back in full; no partial snapshot is ever visible.
pub fn freeze_schedule(
    conn: &mut SqliteConnection,
    target_date: Date,
) -> Result<FreezeOutcome, PersistenceError> {
    conn.transaction::<FreezeOutcome, PersistenceError, _>(|conn| {
        let date_text: String = format_date(target_date);

        let existing: Option<i64> = frozen_schedules::table
            .select(frozen_schedules::frozen_schedule_id)
            .filter(frozen_schedules::date.eq(&date_text))
            .first::<i64>(conn)
            .optional()?;
        if let Some(frozen_schedule_id) = existing {
            debug!(date = %date_text, frozen_schedule_id, "Date already frozen, skipping");
            return Ok(FreezeOutcome::AlreadyFrozen);
        }

        // Assemble the same composite view the live schedule endpoint
        // serves, from reads inside this transaction.
        let departments = queries::entities::list_departments(conn)?;
        let services = queries::entities::list_services(conn)?;
        let shifts = queries::entities::list_shifts(conn)?;
        let porters = queries::entities::list_porters(conn)?;
        let schedule: ScheduleView =
            assemble_schedule(target_date, departments, services, &shifts, &porters);

        let frozen_at: String = time::OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))?;

        let document: FrozenScheduleDocument = FrozenScheduleDocument {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            frozen_at: frozen_at.clone(),
            schedule,
        };

        let (frozen_schedule_id, assignments) = insert_snapshot_rows(conn, &date_text, &document)?;

        info!(
            date = %date_text,
            frozen_schedule_id,
            assignments,
            "Froze schedule data"
        );

        Ok(FreezeOutcome::Frozen(FrozenScheduleRecord {
            frozen_schedule_id,
            date: target_date,
            frozen_at,
        }))
    })
}

/// Inserts the schedule row and its per-assignment rows.
///
/// Callers must wrap this in a transaction; the insert sequence is not
/// atomic on its own.
///
/// # Errors
///
/// Returns an error if serialization or any insert fails.
pub(crate) fn insert_snapshot_rows(
    conn: &mut SqliteConnection,
    date_text: &str,
    document: &FrozenScheduleDocument,
) -> Result<(i64, usize), PersistenceError> {
    let payload: String = serde_json::to_string(document)?;

    diesel::insert_into(frozen_schedules::table)
        .values((
            frozen_schedules::date.eq(date_text),
            frozen_schedules::schedule_data.eq(&payload),
            frozen_schedules::frozen_at.eq(&document.frozen_at),
        ))
        .execute(conn)?;
    let frozen_schedule_id: i64 = get_last_insert_rowid(conn)?;

    // One denormalized row per (shift, assigned porter) pair in the view.
    // Entries without persisted ids cannot be referenced and are skipped.
    let mut assignments: usize = 0;
    for roster in &document.schedule.active_shifts {
        let Some(shift_id) = roster.shift.shift_id else {
            continue;
        };
        for entry in &roster.assigned_porters {
            let Some(porter_id) = entry.porter.porter_id else {
                continue;
            };
            diesel::insert_into(frozen_porter_assignments::table)
                .values((
                    frozen_porter_assignments::frozen_schedule_id.eq(frozen_schedule_id),
                    frozen_porter_assignments::porter_id.eq(porter_id),
                    frozen_porter_assignments::shift_id.eq(shift_id),
                    frozen_porter_assignments::is_active_today.eq(i32::from(entry.is_active_today)),
                    frozen_porter_assignments::is_temporarily_assigned
                        .eq(i32::from(entry.is_temporarily_assigned)),
                    frozen_porter_assignments::temp_assignment_location
                        .eq(entry.temp_assignment_location.as_deref()),
                ))
                .execute(conn)?;
            assignments += 1;
        }
    }

    Ok((frozen_schedule_id, assignments))
}
