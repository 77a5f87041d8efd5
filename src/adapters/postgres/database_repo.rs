//! PostgreSQL implementation of DatabaseRepo.
//!
//! A reservation row and the room restriction blocking its dates are written
//! in one transaction. The overlap check runs while the room row is locked,
//! so two confirmations for the same room cannot both pass it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{ReservationId, RoomId};
use crate::domain::reservation::{Reservation, Room, StayPeriod};
use crate::ports::{DatabaseRepo, RepoError};

/// `restrictions.id` of the "Reservation" restriction kind.
const RESERVATION_RESTRICTION: i32 = 1;

/// PostgreSQL implementation of DatabaseRepo.
#[derive(Clone)]
pub struct PostgresDatabaseRepo {
    pool: PgPool,
}

impl PostgresDatabaseRepo {
    /// Creates a new PostgresDatabaseRepo.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseRepo for PostgresDatabaseRepo {
    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: &StayPeriod,
        room_id: RoomId,
    ) -> Result<bool, RepoError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(id)
            FROM room_restrictions
            WHERE room_id = $1
              AND $2 < end_date
              AND $3 > start_date
            "#,
        )
        .bind(room_id.value())
        .bind(stay.start())
        .bind(stay.end())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::database("search_availability_by_dates_by_room_id", e))?;

        Ok(count == 0)
    }

    async fn search_availability_for_all_rooms(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Room>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.room_name
            FROM rooms r
            WHERE r.id NOT IN (
                SELECT rr.room_id
                FROM room_restrictions rr
                WHERE $1 < rr.end_date
                  AND $2 > rr.start_date
            )
            ORDER BY r.id
            "#,
        )
        .bind(stay.start())
        .bind(stay.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("search_availability_for_all_rooms", e))?;

        rows.into_iter().map(row_to_room).collect()
    }

    async fn get_room_by_id(&self, room_id: RoomId) -> Result<Room, RepoError> {
        let row = sqlx::query("SELECT id, room_name FROM rooms WHERE id = $1")
            .bind(room_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_room_by_id", e))?;

        match row {
            Some(row) => row_to_room(row),
            None => Err(RepoError::RoomNotFound(room_id)),
        }
    }

    async fn insert_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<ReservationId, RepoError> {
        let stay = reservation
            .stay
            .ok_or(RepoError::Incomplete("reservation has no stay"))?;
        let room_id = reservation
            .room_id
            .ok_or(RepoError::Incomplete("reservation has no room"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin transaction", e))?;

        lock_room(&mut tx, room_id).await?;

        let (overlapping,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(id)
            FROM room_restrictions
            WHERE room_id = $1
              AND $2 < end_date
              AND $3 > start_date
            "#,
        )
        .bind(room_id.value())
        .bind(stay.start())
        .bind(stay.end())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepoError::database("check overlapping restrictions", e))?;

        if overlapping > 0 {
            return Err(RepoError::Conflict {
                room_id,
                start: stay.start(),
                end: stay.end(),
            });
        }

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO reservations (
                first_name, last_name, email, phone, start_date, end_date, room_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&reservation.first_name)
        .bind(&reservation.last_name)
        .bind(&reservation.email)
        .bind(&reservation.phone)
        .bind(stay.start())
        .bind(stay.end())
        .bind(room_id.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| RepoError::database("insert_reservation", e))?;

        sqlx::query(
            r#"
            INSERT INTO room_restrictions (
                start_date, end_date, room_id, reservation_id, restriction_id
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(stay.start())
        .bind(stay.end())
        .bind(room_id.value())
        .bind(id)
        .bind(RESERVATION_RESTRICTION)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("insert_room_restriction", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("commit transaction", e))?;

        Ok(ReservationId::new(id))
    }
}

async fn lock_room(tx: &mut Transaction<'_, Postgres>, room_id: RoomId) -> Result<(), RepoError> {
    let row = sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
        .bind(room_id.value())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| RepoError::database("lock room", e))?;

    match row {
        Some(_) => Ok(()),
        None => Err(RepoError::RoomNotFound(room_id)),
    }
}

fn row_to_room(row: sqlx::postgres::PgRow) -> Result<Room, RepoError> {
    let id: i32 = row
        .try_get("id")
        .map_err(|e| RepoError::database("decode room", e))?;
    let room_name: String = row
        .try_get("room_name")
        .map_err(|e| RepoError::database("decode room", e))?;
    Ok(Room::new(RoomId::new(id), room_name))
}
