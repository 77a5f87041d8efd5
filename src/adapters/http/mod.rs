//! HTTP adapters - the site's routes.
//!
//! Each area has its own module of handlers and routes; [`app_router`]
//! assembles them behind the session middleware.

pub mod booking;
pub mod middleware;
pub mod pages;
mod render;
mod state;

pub use state::AppState;

use axum::{routing::get, Router};

use self::middleware::{session_middleware, SessionState};

/// The complete site router with its state applied.
///
/// Every route except `/health` runs inside `session_middleware`.
pub fn app_router(state: AppState, sessions: SessionState) -> Router {
    let site = Router::new()
        .merge(pages::pages_router())
        .merge(booking::booking_router())
        .layer(axum::middleware::from_fn_with_state(
            sessions,
            session_middleware,
        ));

    Router::new()
        .route("/health", get(pages::handlers::health))
        .merge(site)
        .with_state(state)
}
