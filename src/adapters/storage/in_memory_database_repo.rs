//! In-memory implementation of DatabaseRepo.
//!
//! Behaves like the PostgreSQL adapter: a reservation blocks its room for
//! the half-open stay, and an overlapping insert is refused.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ReservationId, RoomId};
use crate::domain::reservation::{Reservation, Room, StayPeriod};
use crate::ports::{DatabaseRepo, RepoError};

#[derive(Debug, Clone)]
struct Restriction {
    room_id: RoomId,
    stay: StayPeriod,
}

#[derive(Debug, Default)]
struct Tables {
    reservations: Vec<(ReservationId, Reservation)>,
    restrictions: Vec<Restriction>,
    next_id: i32,
}

/// In-memory room and reservation storage.
#[derive(Debug, Clone)]
pub struct InMemoryDatabaseRepo {
    rooms: Arc<Vec<Room>>,
    tables: Arc<RwLock<Tables>>,
    fail_inserts: bool,
}

impl InMemoryDatabaseRepo {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms: Arc::new(rooms),
            tables: Arc::new(RwLock::new(Tables {
                next_id: 1,
                ..Tables::default()
            })),
            fail_inserts: false,
        }
    }

    /// Repository holding the two rooms the site ships with.
    pub fn with_seeded_rooms() -> Self {
        Self::new(Room::seeded())
    }

    /// Makes every insert fail with a database error.
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub async fn reservation_count(&self) -> usize {
        self.tables.read().await.reservations.len()
    }

    /// Stored reservation by id.
    pub async fn reservation(&self, id: ReservationId) -> Option<Reservation> {
        self.tables
            .read()
            .await
            .reservations
            .iter()
            .find(|(stored, _)| *stored == id)
            .map(|(_, reservation)| reservation.clone())
    }

    fn room_is_free(tables: &Tables, stay: &StayPeriod, room_id: RoomId) -> bool {
        !tables
            .restrictions
            .iter()
            .any(|r| r.room_id == room_id && r.stay.overlaps(stay))
    }
}

#[async_trait]
impl DatabaseRepo for InMemoryDatabaseRepo {
    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: &StayPeriod,
        room_id: RoomId,
    ) -> Result<bool, RepoError> {
        let tables = self.tables.read().await;
        Ok(Self::room_is_free(&tables, stay, room_id))
    }

    async fn search_availability_for_all_rooms(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Room>, RepoError> {
        let tables = self.tables.read().await;
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|room| Self::room_is_free(&tables, stay, room.id))
            .cloned()
            .collect();
        rooms.sort_by_key(|room| room.id);
        Ok(rooms)
    }

    async fn get_room_by_id(&self, room_id: RoomId) -> Result<Room, RepoError> {
        self.rooms
            .iter()
            .find(|room| room.id == room_id)
            .cloned()
            .ok_or(RepoError::RoomNotFound(room_id))
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
        self.get_room_by_id(room_id).await?;

        if self.fail_inserts {
            return Err(RepoError::database(
                "insert_reservation",
                "simulated failure",
            ));
        }

        let mut tables = self.tables.write().await;
        if !Self::room_is_free(&tables, &stay, room_id) {
            return Err(RepoError::Conflict {
                room_id,
                start: stay.start(),
                end: stay.end(),
            });
        }

        let id = ReservationId::new(tables.next_id);
        tables.next_id += 1;
        tables.reservations.push((id, reservation.clone()));
        tables.restrictions.push(Restriction {
            room_id,
            stay,
        });
        tracing::debug!(reservation_id = %id, room_id = %room_id, "Stored reservation in memory");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay(start: &str, end: &str) -> StayPeriod {
        StayPeriod::parse(start, end).unwrap()
    }

    fn booking(room: i32, start: &str, end: &str) -> Reservation {
        let mut r = Reservation::for_stay(stay(start, end));
        r.room_id = Some(RoomId::new(room));
        r
    }

    #[tokio::test]
    async fn all_rooms_free_when_empty() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        let rooms = repo
            .search_availability_for_all_rooms(&stay("2021-01-01", "2021-01-02"))
            .await
            .unwrap();
        assert_eq!(rooms, Room::seeded());
    }

    #[tokio::test]
    async fn booking_blocks_overlapping_stays_only() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        let id = repo
            .insert_reservation(&booking(1, "2021-01-05", "2021-01-10"))
            .await
            .unwrap();
        assert_eq!(id, ReservationId::new(1));

        let room = RoomId::new(1);
        assert!(!repo
            .search_availability_by_dates_by_room_id(&stay("2021-01-09", "2021-01-12"), room)
            .await
            .unwrap());
        // Checkout day is free for the next guest.
        assert!(repo
            .search_availability_by_dates_by_room_id(&stay("2021-01-10", "2021-01-12"), room)
            .await
            .unwrap());
        assert!(repo
            .search_availability_by_dates_by_room_id(&stay("2021-01-01", "2021-01-05"), room)
            .await
            .unwrap());

        let free = repo
            .search_availability_for_all_rooms(&stay("2021-01-06", "2021-01-07"))
            .await
            .unwrap();
        assert_eq!(free.iter().map(|r| r.id).collect::<Vec<_>>(), vec![RoomId::new(2)]);
    }

    #[tokio::test]
    async fn overlapping_insert_is_a_conflict() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        repo.insert_reservation(&booking(2, "2021-01-05", "2021-01-10"))
            .await
            .unwrap();

        let err = repo
            .insert_reservation(&booking(2, "2021-01-01", "2021-01-06"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict { .. }));
        assert_eq!(repo.reservation_count().await, 1);
    }

    #[tokio::test]
    async fn incomplete_or_unknown_room_is_refused() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();

        let no_room = Reservation::for_stay(stay("2021-01-01", "2021-01-02"));
        assert!(matches!(
            repo.insert_reservation(&no_room).await,
            Err(RepoError::Incomplete(_))
        ));
        assert!(matches!(
            repo.insert_reservation(&booking(9, "2021-01-01", "2021-01-02")).await,
            Err(RepoError::RoomNotFound(_))
        ));
        assert!(matches!(
            repo.get_room_by_id(RoomId::new(9)).await,
            Err(RepoError::RoomNotFound(_))
        ));
    }

    #[tokio::test]
    async fn stored_reservation_can_be_read_back() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        let mut r = booking(1, "2021-02-01", "2021-02-03");
        r.first_name = "Ann".into();
        let id = repo.insert_reservation(&r).await.unwrap();
        assert_eq!(repo.reservation(id).await.map(|r| r.first_name), Some("Ann".into()));
    }

    #[tokio::test]
    async fn check_availability_rejects_backwards_range() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(matches!(
            repo.check_availability(start, end, RoomId::new(1)).await,
            Err(RepoError::InvalidDateRange { .. })
        ));
    }

    #[tokio::test]
    async fn check_availability_rejects_unknown_room() {
        let repo = InMemoryDatabaseRepo::with_seeded_rooms();
        let start = chrono::NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
        assert_eq!(
            repo.check_availability(start, end, RoomId::new(999)).await,
            Err(RepoError::RoomNotFound(RoomId::new(999)))
        );
        assert_eq!(
            repo.check_availability(start, end, RoomId::new(2)).await,
            Ok(true)
        );
    }
}
