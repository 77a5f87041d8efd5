//! Reservation domain.
//!
//! A [`Reservation`] is one guest's booking attempt. It is built from the
//! reservation form, staged in the visitor's session, and finally persisted
//! through the `DatabaseRepo` port. [`WorkflowState`] names the steps of that
//! journey.

mod reservation;
mod room;
mod stay;
mod workflow_state;

pub use reservation::{Reservation, ReservationStatus};
pub use room::Room;
pub use stay::StayPeriod;
pub use workflow_state::WorkflowState;
