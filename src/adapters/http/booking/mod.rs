//! HTTP adapter for the booking flow: search, room choice, the reservation
//! form, the summary and the JSON availability check.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_router;
