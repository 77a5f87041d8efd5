//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, state machine trait, errors)
//! - `forms` - Rule-based validation of submitted form values
//! - `reservation` - Reservations, rooms, stay periods and the workflow states

pub mod forms;
pub mod foundation;
pub mod reservation;
