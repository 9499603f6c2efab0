// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The canonical date format for all serialized dates (`YYYY-MM-DD`).
const ISO_DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses a date from its canonical `YYYY-MM-DD` representation.
///
/// All dates in this system are day-granular; any time-of-day component
/// must be removed by the caller before the value reaches the domain layer.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ISO_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date in its canonical `YYYY-MM-DD` representation.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serde helpers serializing `time::Date` as `YYYY-MM-DD` strings.
///
/// Used via `#[serde(with = "serde_date")]` on date fields so serialized
/// payloads (snapshot documents, API responses) carry the same canonical
/// representation as the persistence layer.
pub mod serde_date {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes a date as a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserializes a date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: String = String::deserialize(deserializer)?;
        super::parse_date(&value).map_err(D::Error::custom)
    }

    /// Serde helpers for `Option<time::Date>` fields.
    pub mod option {
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        /// Serializes an optional date as a `YYYY-MM-DD` string or null.
        ///
        /// # Errors
        ///
        /// Returns an error if the underlying serializer fails.
        pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(d) => serializer.serialize_some(&crate::types::format_date(*d)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional date from a `YYYY-MM-DD` string or null.
        ///
        /// # Errors
        ///
        /// Returns an error if a present string is not a valid date.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value: Option<String> = Option::deserialize(deserializer)?;
            value
                .map(|v| crate::types::parse_date(&v).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// Represents a porter's role classification.
///
/// The vocabulary is configuration data, not a closed set: deployments add
/// values (e.g. `SENIOR_PORTER`) without code changes. Values are normalized
/// to uppercase so comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PorterType {
    /// The role value (e.g. `PORTER`, `SUPERVISOR`).
    value: String,
}

impl PorterType {
    /// Creates a new `PorterType`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
        }
    }

    /// Returns the role value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for PorterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents a porter's contracted-hours classification.
///
/// Like [`PorterType`], this is an open vocabulary (`SHIFT`, `CUSTOM`,
/// `RELIEF`, ...). Only the `CUSTOM` value carries engine semantics: it
/// enables the custom-hours availability rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractedHoursType {
    /// The classification value.
    value: String,
}

impl ContractedHoursType {
    /// The value that enables per-day custom working hours.
    pub const CUSTOM: &'static str = "CUSTOM";

    /// Creates a new `ContractedHoursType`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
        }
    }

    /// Returns the classification value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether this porter works per-day custom hours.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.value == Self::CUSTOM
    }
}

impl std::fmt::Display for ContractedHoursType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A start/end time-of-day pair, carried as `HH:MM` strings.
///
/// Times are never used in arithmetic by this system; they are validated on
/// entry and passed through to consumers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// The start time (`HH:MM`).
    pub start: String,
    /// The end time (`HH:MM`).
    pub end: String,
}

impl WorkingHours {
    /// Creates a new `WorkingHours` pair.
    #[must_use]
    pub const fn new(start: String, end: String) -> Self {
        Self { start, end }
    }
}

/// Represents a department needing porter coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the department has not been persisted yet.
    pub department_id: Option<i64>,
    /// The department name.
    pub name: String,
    /// Whether the department requires around-the-clock coverage.
    pub is_24_7: bool,
    /// Porters required during the day period.
    pub porters_required_day: i32,
    /// Porters required during the night period.
    pub porters_required_night: i32,
    /// Whether the department is active. Deactivated departments are
    /// excluded from all schedule computation.
    pub is_active: bool,
}

impl Department {
    /// Creates a new `Department` without a persisted ID.
    #[must_use]
    pub const fn new(
        name: String,
        is_24_7: bool,
        porters_required_day: i32,
        porters_required_night: i32,
    ) -> Self {
        Self {
            department_id: None,
            name,
            is_24_7,
            porters_required_day,
            porters_required_night,
            is_active: true,
        }
    }
}

/// Represents a service needing porter coverage.
///
/// Services are structurally identical to departments but form a separate
/// assignment namespace: a porter is assigned to a department or a service,
/// never both at the same priority level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the service has not been persisted yet.
    pub service_id: Option<i64>,
    /// The service name.
    pub name: String,
    /// Whether the service requires around-the-clock coverage.
    pub is_24_7: bool,
    /// Porters required during the day period.
    pub porters_required_day: i32,
    /// Porters required during the night period.
    pub porters_required_night: i32,
    /// Whether the service is active.
    pub is_active: bool,
}

impl Service {
    /// Creates a new `Service` without a persisted ID.
    #[must_use]
    pub const fn new(
        name: String,
        is_24_7: bool,
        porters_required_day: i32,
        porters_required_night: i32,
    ) -> Self {
        Self {
            service_id: None,
            name,
            is_24_7,
            porters_required_day,
            porters_required_night,
            is_active: true,
        }
    }
}

/// Represents a named repeating work pattern.
///
/// A shift alternates `days_on` working days and `days_off` rest days,
/// measured from `ground_zero_date`. The `shift_offset` moves the whole
/// pattern within the cycle without changing the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the shift has not been persisted yet.
    pub shift_id: Option<i64>,
    /// The shift name.
    pub name: String,
    /// Working day start time (`HH:MM`).
    pub starts_at: String,
    /// Working day end time (`HH:MM`).
    pub ends_at: String,
    /// Consecutive working days per cycle. Must be at least 1.
    pub days_on: i32,
    /// Consecutive rest days per cycle. Must be at least 1.
    pub days_off: i32,
    /// Day offset applied to the cycle position. May be negative.
    pub shift_offset: i32,
    /// The reference date from which the cycle is measured.
    #[serde(with = "serde_date")]
    pub ground_zero_date: Date,
    /// Whether the shift is active.
    pub is_active: bool,
}

impl Shift {
    /// Creates a new `Shift` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The shift name
    /// * `starts_at` / `ends_at` - Working hours (`HH:MM`)
    /// * `days_on` / `days_off` - Cycle shape (validated separately)
    /// * `shift_offset` - Day offset applied to the cycle position
    /// * `ground_zero_date` - The cycle reference date
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: String,
        starts_at: String,
        ends_at: String,
        days_on: i32,
        days_off: i32,
        shift_offset: i32,
        ground_zero_date: Date,
    ) -> Self {
        Self {
            shift_id: None,
            name,
            starts_at,
            ends_at,
            days_on,
            days_off,
            shift_offset,
            ground_zero_date,
            is_active: true,
        }
    }

    /// Returns the full cycle length in days (`days_on + days_off`).
    ///
    /// The result is positive for any validated shift.
    #[must_use]
    pub fn cycle_length(&self) -> i64 {
        i64::from(self.days_on) + i64::from(self.days_off)
    }

    /// Returns the shift's working hours as a [`WorkingHours`] pair.
    #[must_use]
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours::new(self.starts_at.clone(), self.ends_at.clone())
    }
}

/// Represents a member of the portering staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Porter {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the porter has not been persisted yet.
    pub porter_id: Option<i64>,
    /// The porter's name.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// The porter's role classification (open vocabulary).
    pub porter_type: PorterType,
    /// The porter's contracted-hours classification (open vocabulary).
    pub contracted_hours_type: ContractedHoursType,
    /// Contracted hours per week.
    pub weekly_contracted_hours: f64,
    /// The owning shift, if the porter works a rotating pattern.
    pub shift_id: Option<i64>,
    /// Day shift applied to the owning shift's ground zero, letting porters
    /// on the same pattern start their personal cycle on different days.
    pub porter_offset: i32,
    /// Permanent department assignment. Mutually exclusive with
    /// `regular_service_id`.
    pub regular_department_id: Option<i64>,
    /// Permanent service assignment. Mutually exclusive with
    /// `regular_department_id`.
    pub regular_service_id: Option<i64>,
    /// Temporary department override. Mutually exclusive with
    /// `temp_service_id`.
    pub temp_department_id: Option<i64>,
    /// Temporary service override. Mutually exclusive with
    /// `temp_department_id`.
    pub temp_service_id: Option<i64>,
    /// First day of the temporary assignment window (inclusive).
    #[serde(with = "serde_date::option")]
    pub temp_assignment_start: Option<Date>,
    /// Last day of the temporary assignment window (inclusive).
    #[serde(with = "serde_date::option")]
    pub temp_assignment_end: Option<Date>,
    /// Whether the porter is active.
    pub is_active: bool,
}

impl Porter {
    /// Creates a new `Porter` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The porter's name
    /// * `email` - Optional contact email
    /// * `porter_type` - Role classification
    /// * `contracted_hours_type` - Contracted-hours classification
    /// * `weekly_contracted_hours` - Contracted hours per week
    /// * `shift_id` - Owning shift, if any
    /// * `porter_offset` - Personal day offset within the shift cycle
    /// * `regular_department_id` / `regular_service_id` - Permanent location
    /// * `temp_department_id` / `temp_service_id` - Temporary override
    /// * `temp_assignment_start` / `temp_assignment_end` - Override window
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: String,
        email: Option<String>,
        porter_type: PorterType,
        contracted_hours_type: ContractedHoursType,
        weekly_contracted_hours: f64,
        shift_id: Option<i64>,
        porter_offset: i32,
        regular_department_id: Option<i64>,
        regular_service_id: Option<i64>,
        temp_department_id: Option<i64>,
        temp_service_id: Option<i64>,
        temp_assignment_start: Option<Date>,
        temp_assignment_end: Option<Date>,
    ) -> Self {
        Self {
            porter_id: None,
            name,
            email,
            porter_type,
            contracted_hours_type,
            weekly_contracted_hours,
            shift_id,
            porter_offset,
            regular_department_id,
            regular_service_id,
            temp_department_id,
            temp_service_id,
            temp_assignment_start,
            temp_assignment_end,
            is_active: true,
        }
    }

    /// Returns whether `date` falls inside the porter's temporary
    /// assignment window (inclusive on both ends).
    ///
    /// Returns `false` when either bound is missing: an open-ended window
    /// is not a valid temporary assignment.
    #[must_use]
    pub fn has_temp_assignment_on(&self, date: Date) -> bool {
        match (self.temp_assignment_start, self.temp_assignment_end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}

/// A custom per-day working window for one porter.
///
/// A porter has at most one row per day of week; replacing a porter's hours
/// is last-write-wins over the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PorterHours {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the row has not been persisted yet.
    pub porter_hours_id: Option<i64>,
    /// The porter these hours belong to.
    pub porter_id: i64,
    /// Day of week: 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    /// Working window start time (`HH:MM`).
    pub starts_at: String,
    /// Working window end time (`HH:MM`).
    pub ends_at: String,
}

impl PorterHours {
    /// Creates a new `PorterHours` row without a persisted ID.
    #[must_use]
    pub const fn new(porter_id: i64, day_of_week: u8, starts_at: String, ends_at: String) -> Self {
        Self {
            porter_hours_id: None,
            porter_id,
            day_of_week,
            starts_at,
            ends_at,
        }
    }

    /// Returns the window as a [`WorkingHours`] pair.
    #[must_use]
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours::new(self.starts_at.clone(), self.ends_at.clone())
    }
}
