//! Bookings - Server-rendered room booking site
//!
//! Visitors search for free dates, pick a room, fill in their details and
//! confirm. The reservation travels between those pages in the visitor's
//! session and is written to the database only on confirmation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
