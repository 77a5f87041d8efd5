//! Database repository port.
//!
//! The only seam between the reservation workflow and any storage
//! technology. Production uses PostgreSQL; tests use the in-memory fake.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ErrorCode, ReservationId, RoomId};
use crate::domain::reservation::{Reservation, Room, StayPeriod};

/// Errors returned by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("Invalid date range: end {end} is not after start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Room {room_id} is already booked between {start} and {end}")]
    Conflict {
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Reservation cannot be stored: {0}")]
    Incomplete(&'static str),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Database error during {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    pub fn database(operation: &'static str, err: impl std::fmt::Display) -> Self {
        RepoError::Database {
            operation,
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RepoError::InvalidDateRange { .. } => ErrorCode::InvalidDateRange,
            RepoError::Conflict { .. } => ErrorCode::BookingConflict,
            RepoError::Incomplete(_) => ErrorCode::IncompleteReservation,
            RepoError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            RepoError::Database { .. } => ErrorCode::DatabaseError,
        }
    }
}

/// Repository port for rooms and reservations.
#[async_trait]
pub trait DatabaseRepo: Send + Sync {
    /// Whether the room is free for the whole stay.
    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: &StayPeriod,
        room_id: RoomId,
    ) -> Result<bool, RepoError>;

    /// Rooms free for the whole stay, ordered by id.
    async fn search_availability_for_all_rooms(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Room>, RepoError>;

    /// # Errors
    ///
    /// - `RoomNotFound` if no room has this id
    async fn get_room_by_id(&self, room_id: RoomId) -> Result<Room, RepoError>;

    /// Stores a reservation together with the restriction blocking its room.
    ///
    /// # Errors
    ///
    /// - `Incomplete` if the stay or room is missing
    /// - `Conflict` if the stay overlaps an existing booking of the room
    /// - `Database` on persistence failure
    async fn insert_reservation(&self, reservation: &Reservation)
        -> Result<ReservationId, RepoError>;

    /// Availability check over raw dates.
    ///
    /// # Errors
    ///
    /// - `InvalidDateRange` if `end <= start`
    /// - `RoomNotFound` if no room has this id
    async fn check_availability(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        room_id: RoomId,
    ) -> Result<bool, RepoError> {
        let stay = StayPeriod::new(start, end)
            .map_err(|_| RepoError::InvalidDateRange { start, end })?;
        self.get_room_by_id(room_id).await?;
        self.search_availability_by_dates_by_room_id(&stay, room_id)
            .await
    }
}
