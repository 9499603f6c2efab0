// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Frozen snapshot reads.
//!
//! Frozen rows are immutable: these queries never rewrite or repair a
//! stored document. A document with an unsupported schema version is a
//! hard error so callers never act on a misread snapshot.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rotascope_domain::format_date;
use time::Date;

use crate::data_models::{
    FrozenPorterAssignmentRecord, FrozenScheduleDocument, FrozenScheduleRecord, FrozenSnapshot,
    SNAPSHOT_SCHEMA_VERSION,
};
use crate::diesel_schema::{frozen_porter_assignments, frozen_schedules};
use crate::error::PersistenceError;

/// Returns whether a frozen snapshot exists for `date`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn is_date_frozen(conn: &mut SqliteConnection, date: Date) -> Result<bool, PersistenceError> {
    let found: Option<i64> = frozen_schedules::table
        .select(frozen_schedules::frozen_schedule_id)
        .filter(frozen_schedules::date.eq(format_date(date)))
        .first::<i64>(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Retrieves the frozen snapshot for `date`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no snapshot exists for the date,
/// `PersistenceError::SnapshotVersionMismatch` if the stored document's
/// schema version is unsupported, and a serialization error if the document
/// cannot be parsed.
pub fn get_frozen_schedule(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<FrozenSnapshot, PersistenceError> {
    let date_text: String = format_date(date);
    let row: Option<(i64, String, String, String)> = frozen_schedules::table
        .filter(frozen_schedules::date.eq(&date_text))
        .first::<(i64, String, String, String)>(conn)
        .optional()?;

    let Some((frozen_schedule_id, stored_date, schedule_data, frozen_at)) = row else {
        return Err(PersistenceError::NotFound(format!(
            "No frozen schedule for date {date_text}"
        )));
    };

    let document: FrozenScheduleDocument = serde_json::from_str(&schedule_data)?;
    if document.schema_version != SNAPSHOT_SCHEMA_VERSION {
        return Err(PersistenceError::SnapshotVersionMismatch {
            found: document.schema_version,
            supported: SNAPSHOT_SCHEMA_VERSION,
        });
    }

    let record_date: Date = rotascope_domain::parse_date(&stored_date)
        .map_err(|e| PersistenceError::InvalidStoredData(format!("date: {e}")))?;

    Ok(FrozenSnapshot {
        record: FrozenScheduleRecord {
            frozen_schedule_id,
            date: record_date,
            frozen_at,
        },
        document,
    })
}

/// Lists the denormalized assignment rows of a frozen schedule.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_frozen_assignments(
    conn: &mut SqliteConnection,
    frozen_schedule_id: i64,
) -> Result<Vec<FrozenPorterAssignmentRecord>, PersistenceError> {
    let rows: Vec<(i64, i64, i64, i64, i32, i32, Option<String>)> = frozen_porter_assignments::table
        .filter(frozen_porter_assignments::frozen_schedule_id.eq(frozen_schedule_id))
        .order(frozen_porter_assignments::frozen_porter_assignment_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(
                frozen_porter_assignment_id,
                frozen_schedule_id,
                porter_id,
                shift_id,
                is_active_today,
                is_temporarily_assigned,
                temp_assignment_location,
            )| FrozenPorterAssignmentRecord {
                frozen_porter_assignment_id,
                frozen_schedule_id,
                porter_id,
                shift_id,
                is_active_today: is_active_today != 0,
                is_temporarily_assigned: is_temporarily_assigned != 0,
                temp_assignment_location,
            },
        )
        .collect())
}

/// Counts the frozen schedule rows stored for `date`.
///
/// The unique constraint keeps this at zero or one; the count form exists
/// so tests can assert idempotency directly.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_frozen_for_date(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<i64, PersistenceError> {
    Ok(frozen_schedules::table
        .filter(frozen_schedules::date.eq(format_date(date)))
        .count()
        .get_result(conn)?)
}
