//! Request and response shapes for the booking endpoints.

use serde::Serialize;

use crate::domain::forms::FormValues;
use crate::domain::reservation::{Room, StayPeriod};

/// An urlencoded body as ordered (field, value) pairs.
pub type FormPairs = Vec<(String, String)>;

pub fn form_values(pairs: FormPairs) -> FormValues {
    FormValues::from(pairs)
}

/// Data for the choose-room page.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableRooms<'a> {
    pub stay: &'a StayPeriod,
    pub nights: i64,
    pub rooms: &'a [Room],
}

impl<'a> AvailableRooms<'a> {
    pub fn new(stay: &'a StayPeriod, rooms: &'a [Room]) -> Self {
        Self {
            stay,
            nights: stay.nights(),
            rooms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RoomId;

    #[test]
    fn form_values_keep_first_duplicate() {
        let values = form_values(vec![
            ("email".to_string(), "a@b.co".to_string()),
            ("email".to_string(), "x@y.co".to_string()),
        ]);
        assert_eq!(values.get("email"), "a@b.co");
    }

    #[test]
    fn available_rooms_serialize_with_nights() {
        let stay = StayPeriod::parse("2021-01-01", "2021-01-04").unwrap();
        let rooms = vec![Room::new(RoomId::new(1), "Warlock's Lair")];
        let json = serde_json::to_value(AvailableRooms::new(&stay, &rooms)).unwrap();
        assert_eq!(json["nights"], 3);
        assert_eq!(json["rooms"][0]["id"], 1);
        assert_eq!(json["stay"]["start"], "2021-01-01");
    }
}
