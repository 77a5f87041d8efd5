//! HTTP adapter for the site's informational pages.

pub mod handlers;
pub mod routes;

pub use routes::pages_router;
