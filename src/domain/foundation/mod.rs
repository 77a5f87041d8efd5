//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait, and the error types
//! that form the vocabulary of the Bookings domain.

mod errors;
mod ids;
mod state_machine;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{ReservationId, RoomId, SessionId};
pub use state_machine::StateMachine;
