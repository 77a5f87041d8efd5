//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("End date {end} must be after start date {start}")]
    InvalidDateRange { start: String, end: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date range error.
    pub fn invalid_date_range(start: impl fmt::Display, end: impl fmt::Display) -> Self {
        ValidationError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Error codes organized by category.
///
/// Attached to log lines so operators can group failures without parsing
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidDateRange,

    // Not found errors
    RoomNotFound,
    ReservationNotStaged,

    // State errors
    InvalidStateTransition,
    BookingConflict,
    IncompleteReservation,

    // Infrastructure errors
    DatabaseError,
    SessionStoreError,
    TemplateError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidDateRange => "INVALID_DATE_RANGE",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::ReservationNotStaged => "RESERVATION_NOT_STAGED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::BookingConflict => "BOOKING_CONFLICT",
            ErrorCode::IncompleteReservation => "INCOMPLETE_RESERVATION",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::SessionStoreError => "SESSION_STORE_ERROR",
            ErrorCode::TemplateError => "TEMPLATE_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("start", "expected YYYY-MM-DD");
        assert_eq!(
            format!("{}", err),
            "Field 'start' has invalid format: expected YYYY-MM-DD"
        );
    }

    #[test]
    fn validation_error_invalid_date_range_displays_correctly() {
        let err = ValidationError::invalid_date_range("2024-01-02", "2024-01-01");
        assert_eq!(
            format!("{}", err),
            "End date 2024-01-01 must be after start date 2024-01-02"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::BookingConflict), "BOOKING_CONFLICT");
        assert_eq!(format!("{}", ErrorCode::ReservationNotStaged), "RESERVATION_NOT_STAGED");
    }
}
