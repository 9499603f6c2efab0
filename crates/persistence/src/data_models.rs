// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rotascope_domain::{ScheduleView, serde_date};
use serde::{Deserialize, Serialize};
use time::Date;

/// The snapshot document schema version written by this build.
///
/// The frozen payload is an opaque document; the version field lets future
/// readers detect (and refuse) formats they do not understand instead of
/// silently misreading them.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// The serialized payload of a frozen schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrozenScheduleDocument {
    /// The document format version. See [`SNAPSHOT_SCHEMA_VERSION`].
    pub schema_version: u32,
    /// When the snapshot was taken (RFC 3339, UTC).
    pub frozen_at: String,
    /// The assembled schedule at freeze time.
    pub schedule: ScheduleView,
}

/// Metadata of a persisted frozen schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenScheduleRecord {
    /// The row's identifier.
    pub frozen_schedule_id: i64,
    /// The date the snapshot covers. Unique across all rows.
    #[serde(with = "serde_date")]
    pub date: Date,
    /// When the snapshot was taken (RFC 3339, UTC).
    pub frozen_at: String,
}

/// One denormalized (frozen schedule, porter, shift) assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenPorterAssignmentRecord {
    /// The row's identifier.
    pub frozen_porter_assignment_id: i64,
    /// The owning frozen schedule.
    pub frozen_schedule_id: i64,
    /// The assigned porter.
    pub porter_id: i64,
    /// The shift the porter was assigned to.
    pub shift_id: i64,
    /// Whether the porter's personal cycle had them working.
    pub is_active_today: bool,
    /// Whether a temporary assignment window covered the date.
    pub is_temporarily_assigned: bool,
    /// The temporary location's name, when applicable.
    pub temp_assignment_location: Option<String>,
}

/// A frozen schedule row together with its parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenSnapshot {
    /// Row metadata.
    pub record: FrozenScheduleRecord,
    /// The parsed snapshot document.
    pub document: FrozenScheduleDocument,
}

/// The result of a freeze attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FreezeOutcome {
    /// A new snapshot was persisted.
    Frozen(FrozenScheduleRecord),
    /// The date already had a snapshot; nothing was written.
    AlreadyFrozen,
}

impl FreezeOutcome {
    /// Returns whether this outcome wrote a new snapshot.
    #[must_use]
    pub const fn was_frozen(&self) -> bool {
        matches!(self, Self::Frozen(_))
    }
}
