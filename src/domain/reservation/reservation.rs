//! Reservation aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::forms::FormValues;
use crate::domain::foundation::{ReservationId, RoomId, StateMachine, ValidationError};
use crate::ports::SessionValue;

use super::{Room, StayPeriod};

/// Where a reservation is in its confirmation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Built from a form or a search, not yet validated.
    #[default]
    Unconfirmed,
    /// Validated and held in the visitor's session.
    Staged,
    /// Written to the database.
    Persisted,
}

impl StateMachine for ReservationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReservationStatus::*;
        match self {
            Unconfirmed => vec![Staged],
            Staged => vec![Staged, Persisted],
            Persisted => vec![],
        }
    }
}

/// One guest's booking attempt.
///
/// The stay and the room are optional until the visitor has searched for
/// dates and picked a room; only a reservation carrying both is bookable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<ReservationId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub stay: Option<StayPeriod>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
}

impl Reservation {
    /// The blank reservation shown when the form is first displayed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A reservation carrying only the dates a visitor searched for.
    pub fn for_stay(stay: StayPeriod) -> Self {
        Self {
            stay: Some(stay),
            ..Self::default()
        }
    }

    /// Builds the guest details from the submitted reservation form.
    pub fn from_form(values: &FormValues) -> Self {
        Self {
            first_name: values.get("first_name").to_string(),
            last_name: values.get("last_name").to_string(),
            email: values.get("email").to_string(),
            phone: values.get("phone").to_string(),
            ..Self::default()
        }
    }

    pub fn with_stay(mut self, stay: Option<StayPeriod>) -> Self {
        self.stay = stay;
        self
    }

    /// Assigns the chosen room.
    pub fn choose_room(&mut self, room: &Room) {
        self.room_id = Some(room.id);
        self.room_name = Some(room.room_name.clone());
    }

    /// Copies stay and room from a previously staged reservation where this
    /// one carries none.
    pub fn inherit_selection(&mut self, staged: &Reservation) {
        if self.stay.is_none() {
            self.stay = staged.stay;
        }
        if self.room_id.is_none() {
            self.room_id = staged.room_id;
            self.room_name = staged.room_name.clone();
        }
    }

    /// Both a stay and a room have been chosen.
    pub fn is_bookable(&self) -> bool {
        self.stay.is_some() && self.room_id.is_some()
    }

    pub fn mark_staged(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(ReservationStatus::Staged)?;
        Ok(())
    }

    pub fn mark_persisted(&mut self, id: ReservationId) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(ReservationStatus::Persisted)?;
        self.id = Some(id);
        Ok(())
    }
}

impl SessionValue for Reservation {
    const TYPE_TAG: &'static str = "reservation.v1";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay() -> StayPeriod {
        StayPeriod::parse("2021-01-01", "2021-01-02").unwrap()
    }

    #[test]
    fn from_form_copies_guest_fields() {
        let values = FormValues::from_pairs([
            ("first_name", "Stephen"),
            ("last_name", "Montague"),
            ("email", "hello@gmail.com"),
            ("phone", "555-555-5555"),
        ]);
        let reservation = Reservation::from_form(&values);
        assert_eq!(reservation.first_name, "Stephen");
        assert_eq!(reservation.last_name, "Montague");
        assert_eq!(reservation.phone, "555-555-5555");
        assert_eq!(reservation.status, ReservationStatus::Unconfirmed);
        assert!(!reservation.is_bookable());
    }

    #[test]
    fn inherit_selection_keeps_own_values() {
        let mut staged = Reservation::for_stay(stay());
        staged.choose_room(&Room::new(RoomId::new(2), "Warrior's Den"));

        let mut fresh = Reservation::from_form(&FormValues::empty());
        fresh.inherit_selection(&staged);
        assert_eq!(fresh.stay, Some(stay()));
        assert_eq!(fresh.room_id, Some(RoomId::new(2)));
        assert!(fresh.is_bookable());

        let other = StayPeriod::parse("2022-05-01", "2022-05-04").unwrap();
        let mut own = Reservation::empty().with_stay(Some(other));
        own.inherit_selection(&staged);
        assert_eq!(own.stay, Some(other));
    }

    #[test]
    fn status_walks_forward_only() {
        let mut reservation = Reservation::for_stay(stay());
        assert!(reservation.mark_persisted(ReservationId::new(1)).is_err());

        reservation.mark_staged().unwrap();
        reservation.mark_staged().unwrap();
        reservation.mark_persisted(ReservationId::new(1)).unwrap();
        assert_eq!(reservation.id, Some(ReservationId::new(1)));
        assert!(reservation.status.is_terminal());
        assert!(reservation.mark_staged().is_err());
    }

    #[test]
    fn serializes_for_session_storage() {
        let mut reservation = Reservation::for_stay(stay());
        reservation.first_name = "Ann".to_string();
        let json = serde_json::to_value(&reservation).unwrap();
        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(back, reservation);
    }
}
