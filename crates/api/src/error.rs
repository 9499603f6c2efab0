// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rotascope_domain::DomainError;
use rotascope_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidCycleConfiguration { days_on, days_off } => {
            ApiError::DomainRuleViolation {
                rule: String::from("positive_cycle_length"),
                message: format!(
                    "Shift cycle requires days_on and days_off of at least 1 (got {days_on}/{days_off})"
                ),
            }
        }
        DomainError::InvalidTimeOfDay(value) => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Invalid time of day '{value}'. Expected HH:MM"),
        },
        DomainError::InvalidDayOfWeek { day } => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message: format!("Invalid day of week: {day}. Must be between 0 and 6"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::ConflictingRegularLocation { porter_name } => ApiError::DomainRuleViolation {
            rule: String::from("exclusive_regular_location"),
            message: format!(
                "Porter '{porter_name}' cannot have both a regular department and a regular service"
            ),
        },
        DomainError::ConflictingTempLocation { porter_name } => ApiError::DomainRuleViolation {
            rule: String::from("exclusive_temp_location"),
            message: format!(
                "Porter '{porter_name}' cannot have both a temporary department and a temporary service"
            ),
        },
        DomainError::InvalidTempAssignmentWindow { start, end } => ApiError::InvalidInput {
            field: String::from("temp_assignment_end"),
            message: format!("Temporary assignment window ends ({end}) before it starts ({start})"),
        },
        DomainError::InvalidPortersRequired { count } => ApiError::InvalidInput {
            field: String::from("porters_required"),
            message: format!("Invalid required porter count: {count}. Must be at least 1"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not
/// leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::SnapshotVersionMismatch { found, supported } => ApiError::Internal {
            message: format!(
                "Frozen snapshot schema version {found} is not supported (expected {supported})"
            ),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
