//! Axum router configuration for the informational pages.

use axum::{routing::get, Router};

use crate::adapters::http::AppState;

use super::handlers::{about, contact, home, warlocks_lair, warriors_den};

/// Create the pages router.
///
/// # Routes
/// - `GET /` - Home
/// - `GET /about` - About, with the visitor's remembered address
/// - `GET /warlocks-lair`, `GET /warriors-den` - Room pages
/// - `GET /contact` - Contact
pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/warlocks-lair", get(warlocks_lair))
        .route("/warriors-den", get(warriors_den))
        .route("/contact", get(contact))
}
