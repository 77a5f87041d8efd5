//! Axum router configuration for the booking flow.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::AppState;

use super::handlers::{
    availability_json, choose_room, reservation_summary, show_reservation_form, show_search,
    submit_reservation, submit_search,
};

/// Create the booking router.
///
/// # Routes
///
/// ## Search
/// - `GET /search-availability` - Date search form
/// - `POST /search-availability` - Search all rooms, then choose one
/// - `POST /search-availability-json` - `{ok, message}` for one room
/// - `GET /choose-room/:id` - Attach a room to the staged stay
///
/// ## Reservation
/// - `GET /make-reservation` - Reservation form
/// - `POST /make-reservation` - Validate and stage the reservation
/// - `GET /reservation-summary` - Confirm the staged reservation
pub fn booking_router() -> Router<AppState> {
    Router::new()
        // Search
        .route("/search-availability", get(show_search).post(submit_search))
        .route("/search-availability-json", post(availability_json))
        .route("/choose-room/:id", get(choose_room))
        // Reservation
        .route(
            "/make-reservation",
            get(show_reservation_form).post(submit_reservation),
        )
        .route("/reservation-summary", get(reservation_summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = booking_router();
    }
}
