//! Results of the workflow entry points.

use serde::Serialize;

use crate::domain::forms::Form;
use crate::domain::reservation::{Reservation, Room, StayPeriod};

/// What the reservation page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDisplay {
    pub reservation: Reservation,
    pub form: Form,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The dates did not pass validation.
    Invalid(Form),
    /// No room is free for the stay; an error notice was recorded.
    NoAvailability,
    /// The stay was staged; the visitor picks one of these rooms next.
    Available { stay: StayPeriod, rooms: Vec<Room> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooseRoomOutcome {
    Chosen(Reservation),
    /// No room has the requested id; an error notice was recorded.
    UnknownRoom,
    /// Nothing usable was staged; an error notice was recorded.
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Show the form again with the entered values and field errors.
    Rejected {
        form: Form,
        reservation: Reservation,
    },
    /// The reservation is held in the session.
    Staged(Reservation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Read back from the session. Persisted when it carried a stay and a
    /// room; `status` tells which.
    Confirmed(Reservation),
    /// The repository refused the reservation. It was staged again and an
    /// error notice recorded.
    NotPersisted(Reservation),
    /// Nothing usable was staged; an error notice was recorded.
    Lost,
}

/// Body of the JSON availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub message: String,
}

impl AvailabilityResponse {
    pub fn new(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
        }
    }
}
