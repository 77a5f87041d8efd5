//! Reservation workflow.
//!
//! Orchestrates search, room choice, the reservation form, staging in the
//! visitor's session and final persistence through the repository.

mod errors;
mod outcomes;
mod workflow;

pub use errors::WorkflowError;
pub use outcomes::{
    AvailabilityResponse, ChooseRoomOutcome, ConfirmOutcome, FormDisplay, SearchOutcome,
    SubmitOutcome,
};
pub use workflow::{ReservationWorkflow, LOST_RESERVATION_MESSAGE};
