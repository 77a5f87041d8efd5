//! HTTP handlers for the booking flow.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::middleware::Visitor;
use crate::adapters::http::render::{internal_error, render_page, see_other, temporary_redirect};
use crate::adapters::http::AppState;
use crate::application::reservation::{
    ChooseRoomOutcome, ConfirmOutcome, ReservationWorkflow, SearchOutcome, SubmitOutcome,
    WorkflowError,
};
use crate::domain::forms::Form as ValidatedForm;
use crate::domain::foundation::RoomId;
use crate::ports::TemplateData;

use super::dto::{form_values, AvailableRooms, FormPairs};

const SEARCH_PAGE: &str = "search-availability.page.html";
const CHOOSE_ROOM_PAGE: &str = "choose-room.page.html";
const RESERVATION_PAGE: &str = "make-reservation.page.html";
const SUMMARY_PAGE: &str = "reservation-summary.page.html";

fn workflow(state: &AppState, visitor: &Visitor) -> ReservationWorkflow {
    ReservationWorkflow::new(state.repo.clone(), visitor.0.clone())
}

/// GET /search-availability
pub async fn show_search(State(state): State<AppState>, visitor: Visitor) -> Response {
    let data = TemplateData::new().with_form(&ValidatedForm::empty());
    render_page(state.renderer.as_ref(), &visitor.0, SEARCH_PAGE, data).await
}

/// POST /search-availability
pub async fn submit_search(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(pairs): Form<FormPairs>,
) -> Response {
    match workflow(&state, &visitor).submit_search(form_values(pairs)).await {
        Ok(SearchOutcome::Invalid(form)) => {
            let data = TemplateData::new().with_form(&form);
            render_page(state.renderer.as_ref(), &visitor.0, SEARCH_PAGE, data).await
        }
        Ok(SearchOutcome::NoAvailability) => see_other("/search-availability"),
        Ok(SearchOutcome::Available { stay, rooms }) => {
            let data = TemplateData::new().with_data("search", AvailableRooms::new(&stay, &rooms));
            render_page(state.renderer.as_ref(), &visitor.0, CHOOSE_ROOM_PAGE, data).await
        }
        Err(e) => handle_workflow_error(e),
    }
}

/// GET /choose-room/:id
pub async fn choose_room(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(room_id): Path<i32>,
) -> Response {
    match workflow(&state, &visitor)
        .choose_room(RoomId::new(room_id))
        .await
    {
        Ok(ChooseRoomOutcome::Chosen(_)) => see_other("/make-reservation"),
        Ok(ChooseRoomOutcome::UnknownRoom) => see_other("/search-availability"),
        Ok(ChooseRoomOutcome::Lost) => temporary_redirect("/"),
        Err(e) => handle_workflow_error(e),
    }
}

/// GET /make-reservation
pub async fn show_reservation_form(State(state): State<AppState>, visitor: Visitor) -> Response {
    let display = workflow(&state, &visitor).show_form().await;
    let data = TemplateData::new()
        .with_form(&display.form)
        .with_data("reservation", &display.reservation);
    render_page(state.renderer.as_ref(), &visitor.0, RESERVATION_PAGE, data).await
}

/// POST /make-reservation
pub async fn submit_reservation(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(pairs): Form<FormPairs>,
) -> Response {
    match workflow(&state, &visitor)
        .submit_reservation(form_values(pairs))
        .await
    {
        Ok(SubmitOutcome::Rejected { form, reservation }) => {
            let data = TemplateData::new()
                .with_form(&form)
                .with_data("reservation", &reservation);
            render_page(state.renderer.as_ref(), &visitor.0, RESERVATION_PAGE, data).await
        }
        Ok(SubmitOutcome::Staged(_)) => see_other("/reservation-summary"),
        Err(e) => handle_workflow_error(e),
    }
}

/// GET /reservation-summary
pub async fn reservation_summary(State(state): State<AppState>, visitor: Visitor) -> Response {
    match workflow(&state, &visitor).confirm().await {
        Ok(ConfirmOutcome::Confirmed(reservation)) => {
            let data = TemplateData::new().with_data("reservation", &reservation);
            render_page(state.renderer.as_ref(), &visitor.0, SUMMARY_PAGE, data).await
        }
        Ok(ConfirmOutcome::NotPersisted(_)) => see_other("/make-reservation"),
        Ok(ConfirmOutcome::Lost) => temporary_redirect("/"),
        Err(e) => handle_workflow_error(e),
    }
}

/// POST /search-availability-json
pub async fn availability_json(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(pairs): Form<FormPairs>,
) -> Response {
    let response = workflow(&state, &visitor)
        .check_availability(&form_values(pairs))
        .await;
    Json(response).into_response()
}

fn handle_workflow_error(error: WorkflowError) -> Response {
    tracing::error!(code = %error.code(), error = %error, "Reservation workflow failed");
    internal_error()
}
