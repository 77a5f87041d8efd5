//! Bookable rooms.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RoomId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_name: String,
}

impl Room {
    pub fn new(id: RoomId, room_name: impl Into<String>) -> Self {
        Self {
            id,
            room_name: room_name.into(),
        }
    }

    /// The rooms seeded by the initial migration.
    pub fn seeded() -> Vec<Room> {
        vec![
            Room::new(RoomId::new(1), "Warlock's Lair"),
            Room::new(RoomId::new(2), "Warrior's Den"),
        ]
    }
}
