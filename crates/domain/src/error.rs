// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A shift's on/off cycle configuration is invalid.
    InvalidCycleConfiguration {
        /// The configured number of days on.
        days_on: i32,
        /// The configured number of days off.
        days_off: i32,
    },
    /// A time-of-day string is not in `HH:MM` format.
    InvalidTimeOfDay(String),
    /// A day-of-week value is outside the 0 (Sunday) to 6 (Saturday) range.
    InvalidDayOfWeek {
        /// The invalid day value.
        day: i32,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// An entity name is empty or invalid.
    InvalidName(String),
    /// A porter has both a regular department and a regular service set.
    ConflictingRegularLocation {
        /// The porter's name.
        porter_name: String,
    },
    /// A porter has both a temporary department and a temporary service set.
    ConflictingTempLocation {
        /// The porter's name.
        porter_name: String,
    },
    /// A temporary assignment window ends before it starts.
    InvalidTempAssignmentWindow {
        /// The window start date.
        start: time::Date,
        /// The window end date.
        end: time::Date,
    },
    /// A required-porter count must be at least 1.
    InvalidPortersRequired {
        /// The invalid count value.
        count: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCycleConfiguration { days_on, days_off } => {
                write!(
                    f,
                    "Invalid cycle configuration: days_on={days_on}, days_off={days_off}. Both must be at least 1"
                )
            }
            Self::InvalidTimeOfDay(value) => {
                write!(f, "Invalid time of day '{value}'. Expected HH:MM")
            }
            Self::InvalidDayOfWeek { day } => {
                write!(
                    f,
                    "Invalid day of week: {day}. Must be between 0 (Sunday) and 6 (Saturday)"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::ConflictingRegularLocation { porter_name } => {
                write!(
                    f,
                    "Porter '{porter_name}' cannot have both a regular department and a regular service"
                )
            }
            Self::ConflictingTempLocation { porter_name } => {
                write!(
                    f,
                    "Porter '{porter_name}' cannot have both a temporary department and a temporary service"
                )
            }
            Self::InvalidTempAssignmentWindow { start, end } => {
                write!(
                    f,
                    "Temporary assignment window ends ({end}) before it starts ({start})"
                )
            }
            Self::InvalidPortersRequired { count } => {
                write!(f, "Invalid required porter count: {count}. Must be at least 1")
            }
        }
    }
}

impl std::error::Error for DomainError {}
