//! Application layer - the reservation workflow and typed session access.
//!
//! Handlers build a [`reservation::ReservationWorkflow`] per request from the
//! shared repository and the visitor's [`session::VisitorSession`].

pub mod reservation;
pub mod session;

pub use reservation::{ReservationWorkflow, WorkflowError};
pub use session::{keys, Notices, VisitorSession};
