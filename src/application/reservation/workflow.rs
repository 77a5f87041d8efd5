//! ReservationWorkflow - drives a visitor from search to summary.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::application::session::{keys, VisitorSession};
use crate::domain::forms::{Form, FormValues};
use crate::domain::foundation::{ErrorCode, RoomId, StateMachine};
use crate::domain::reservation::{
    Reservation, ReservationStatus, Room, StayPeriod, WorkflowState,
};
use crate::ports::{DatabaseRepo, Fetched, RepoError};

use super::{
    AvailabilityResponse, ChooseRoomOutcome, ConfirmOutcome, FormDisplay, SearchOutcome,
    SubmitOutcome, WorkflowError,
};

pub const LOST_RESERVATION_MESSAGE: &str = "Can't get reservation from session";
const NO_AVAILABILITY_MESSAGE: &str = "No availability";
const INSERT_FAILED_MESSAGE: &str = "Can't insert reservation into database";
const CONFLICT_MESSAGE: &str = "Those dates are no longer available for this room";
const UNKNOWN_ROOM_MESSAGE: &str = "Unknown room";
const INVALID_ROOM_MESSAGE: &str = "Invalid room";
const END_BEFORE_START_MESSAGE: &str = "End date must be after start date";

/// Room checked by the JSON endpoint when the request names none.
const DEFAULT_ROOM: RoomId = RoomId::new(1);

/// The reservation workflow for one visitor.
///
/// Built per request from the shared repository and the request's session.
/// Every operation performs its reads before its first write, so a request
/// dropped midway leaves either nothing or a complete write behind.
pub struct ReservationWorkflow {
    repo: Arc<dyn DatabaseRepo>,
    session: VisitorSession,
}

impl ReservationWorkflow {
    pub fn new(repo: Arc<dyn DatabaseRepo>, session: VisitorSession) -> Self {
        Self { repo, session }
    }

    pub fn session(&self) -> &VisitorSession {
        &self.session
    }

    /// `Start`: the reservation form, pre-filled with a staged selection
    /// when the visitor came from a search.
    pub async fn show_form(&self) -> FormDisplay {
        let reservation = self.fetch_staged().await.unwrap_or_else(Reservation::empty);
        debug!(session_id = %self.session.id(), state = ?WorkflowState::Start, "Showing reservation form");

        FormDisplay {
            reservation,
            form: Form::empty(),
        }
    }

    /// Validates the searched dates, finds free rooms and stages the stay.
    pub async fn submit_search(&self, values: FormValues) -> Result<SearchOutcome, WorkflowError> {
        let mut form = Form::new(values);
        form.required(&["start", "end"]);
        form.is_date("start");
        form.is_date("end");

        let stay = if form.valid() {
            match StayPeriod::parse(form.get("start"), form.get("end")) {
                Ok(stay) => Some(stay),
                Err(_) => {
                    form.add_error("end", END_BEFORE_START_MESSAGE);
                    None
                }
            }
        } else {
            None
        };

        let Some(stay) = stay else {
            debug!(session_id = %self.session.id(), errors = form.errors().len(), "Search form rejected");
            return Ok(SearchOutcome::Invalid(form));
        };

        let rooms = self
            .repo
            .search_availability_for_all_rooms(&stay)
            .await
            .map_err(|e| {
                error!(
                    code = %e.code(),
                    start = %stay.start(),
                    end = %stay.end(),
                    error = %e,
                    "Availability search failed"
                );
                e
            })?;

        if rooms.is_empty() {
            self.session
                .put_message(keys::ERROR, NO_AVAILABILITY_MESSAGE)
                .await?;
            info!(start = %stay.start(), end = %stay.end(), "No rooms available");
            return Ok(SearchOutcome::NoAvailability);
        }

        self.session
            .put(keys::RESERVATION, &Reservation::for_stay(stay))
            .await?;
        info!(
            session_id = %self.session.id(),
            start = %stay.start(),
            end = %stay.end(),
            rooms = rooms.len(),
            "Stay staged after search"
        );

        Ok(SearchOutcome::Available { stay, rooms })
    }

    /// Attaches the chosen room to the staged stay.
    pub async fn choose_room(&self, room_id: RoomId) -> Result<ChooseRoomOutcome, WorkflowError> {
        let Some(mut reservation) = self.fetch_staged().await else {
            self.record_lost("choose_room").await;
            return Ok(ChooseRoomOutcome::Lost);
        };

        let room = match self.repo.get_room_by_id(room_id).await {
            Ok(room) => room,
            Err(RepoError::RoomNotFound(_)) => {
                self.session
                    .put_message(keys::ERROR, UNKNOWN_ROOM_MESSAGE)
                    .await?;
                warn!(room_id = %room_id, "Visitor chose an unknown room");
                return Ok(ChooseRoomOutcome::UnknownRoom);
            }
            Err(e) => {
                error!(code = %e.code(), room_id = %room_id, error = %e, "Room lookup failed");
                return Err(e.into());
            }
        };

        reservation.choose_room(&room);
        self.session.put(keys::RESERVATION, &reservation).await?;
        debug!(session_id = %self.session.id(), room_id = %room_id, "Room chosen");

        Ok(ChooseRoomOutcome::Chosen(reservation))
    }

    /// `Submitted -> Rejected | Staged`.
    ///
    /// A rejected submission ends here: nothing is written to the session.
    pub async fn submit_reservation(
        &self,
        values: FormValues,
    ) -> Result<SubmitOutcome, WorkflowError> {
        let state = WorkflowState::Start.transition_to(WorkflowState::Submitted)?;

        let mut form = Form::new(values);
        form.required(&["first_name", "last_name", "email"]);
        form.min_length("first_name", 3);
        form.is_email("email");
        let stay = submitted_stay(&mut form);
        let room = self.submitted_room(&mut form).await?;

        let mut reservation = Reservation::from_form(form.values()).with_stay(stay);
        if let Some(room) = &room {
            reservation.choose_room(room);
        }

        if !form.valid() {
            let state = state.transition_to(WorkflowState::Rejected)?;
            debug!(
                session_id = %self.session.id(),
                state = ?state,
                errors = form.errors().len(),
                "Reservation form rejected"
            );
            return Ok(SubmitOutcome::Rejected { form, reservation });
        }

        if let Some(staged) = self.fetch_staged().await {
            reservation.inherit_selection(&staged);
        }
        reservation.mark_staged()?;
        self.session.put(keys::RESERVATION, &reservation).await?;

        let state = state.transition_to(WorkflowState::Staged)?;
        info!(
            session_id = %self.session.id(),
            state = ?state,
            bookable = reservation.is_bookable(),
            "Reservation staged"
        );

        Ok(SubmitOutcome::Staged(reservation))
    }

    /// `Staged -> Confirmed | Lost`.
    ///
    /// The staged entry is removed as soon as it has been read, and nothing
    /// is persisted unless that removal succeeded. If the repository then
    /// refuses the reservation it is staged again so the visitor keeps what
    /// they entered.
    pub async fn confirm(&self) -> Result<ConfirmOutcome, WorkflowError> {
        let state = WorkflowState::Staged;

        let mut reservation = match self.fetch_staged().await {
            Some(reservation) if reservation.status == ReservationStatus::Staged => reservation,
            _ => {
                state.transition_to(WorkflowState::Lost)?;
                self.record_lost("confirm").await;
                return Ok(ConfirmOutcome::Lost);
            }
        };

        if let Err(e) = self.session.remove(keys::RESERVATION).await {
            error!(
                code = %e.code(),
                session_id = %self.session.id(),
                error = %e,
                "Failed to clear staged reservation; not persisting"
            );
            return Err(e.into());
        }
        let state = state.transition_to(WorkflowState::Confirmed)?;

        if !reservation.is_bookable() {
            info!(
                session_id = %self.session.id(),
                state = ?state,
                "Reservation confirmed without dates or room; nothing persisted"
            );
            return Ok(ConfirmOutcome::Confirmed(reservation));
        }

        match self.repo.insert_reservation(&reservation).await {
            Ok(id) => {
                reservation.mark_persisted(id)?;
                info!(
                    session_id = %self.session.id(),
                    reservation_id = %id,
                    state = ?state,
                    "Reservation persisted"
                );
                Ok(ConfirmOutcome::Confirmed(reservation))
            }
            Err(e) => {
                error!(
                    code = %e.code(),
                    room_id = ?reservation.room_id,
                    stay = ?reservation.stay,
                    error = %e,
                    "Failed to insert reservation"
                );
                let message = match e {
                    RepoError::Conflict { .. } => CONFLICT_MESSAGE,
                    _ => INSERT_FAILED_MESSAGE,
                };
                self.session.put(keys::RESERVATION, &reservation).await?;
                self.session.put_message(keys::ERROR, message).await?;
                Ok(ConfirmOutcome::NotPersisted(reservation))
            }
        }
    }

    /// Answers the JSON availability endpoint from the repository.
    pub async fn check_availability(&self, values: &FormValues) -> AvailabilityResponse {
        let parse = |field: &str| NaiveDate::parse_from_str(values.get(field).trim(), "%Y-%m-%d");
        let (Ok(start), Ok(end)) = (parse("start"), parse("end")) else {
            return AvailabilityResponse::new(false, "Invalid dates");
        };

        let room_id = if values.get("room_id").trim().is_empty() {
            DEFAULT_ROOM
        } else {
            match values.get("room_id").parse::<RoomId>() {
                Ok(id) => id,
                Err(_) => return AvailabilityResponse::new(false, INVALID_ROOM_MESSAGE),
            }
        };

        match self.repo.check_availability(start, end, room_id).await {
            Ok(true) => AvailabilityResponse::new(true, "Available!"),
            Ok(false) => AvailabilityResponse::new(false, "Not available"),
            Err(e @ RepoError::InvalidDateRange { .. }) => AvailabilityResponse::new(false, e.to_string()),
            Err(RepoError::RoomNotFound(_)) => {
                debug!(room_id = %room_id, "Availability asked for an unknown room");
                AvailabilityResponse::new(false, INVALID_ROOM_MESSAGE)
            }
            Err(e) => {
                error!(
                    code = %e.code(),
                    room_id = %room_id,
                    start = %start,
                    end = %end,
                    error = %e,
                    "Availability check failed"
                );
                AvailabilityResponse::new(false, "Error querying database")
            }
        }
    }

    /// Staged reservation, or `None` when it is missing, malformed or the
    /// store could not be read.
    async fn fetch_staged(&self) -> Option<Reservation> {
        match self.session.get::<Reservation>(keys::RESERVATION).await {
            Ok(Fetched::Found(reservation)) => Some(reservation),
            Ok(Fetched::NotFound) => None,
            Ok(Fetched::WrongShape) => {
                warn!(session_id = %self.session.id(), "Staged reservation has an unexpected shape");
                None
            }
            Err(e) => {
                error!(session_id = %self.session.id(), error = %e, "Failed to read staged reservation");
                None
            }
        }
    }

    async fn record_lost(&self, operation: &'static str) {
        error!(
            code = %ErrorCode::ReservationNotStaged,
            session_id = %self.session.id(),
            operation,
            "{}",
            LOST_RESERVATION_MESSAGE
        );
        if let Err(e) = self
            .session
            .put_message(keys::ERROR, LOST_RESERVATION_MESSAGE)
            .await
        {
            warn!(session_id = %self.session.id(), error = %e, "Failed to record session notice");
        }
    }

    async fn submitted_room(&self, form: &mut Form) -> Result<Option<Room>, WorkflowError> {
        if !form.has("room_id") {
            return Ok(None);
        }
        let Ok(room_id) = form.get("room_id").parse::<RoomId>() else {
            form.add_error("room_id", INVALID_ROOM_MESSAGE);
            return Ok(None);
        };

        match self.repo.get_room_by_id(room_id).await {
            Ok(room) => Ok(Some(room)),
            Err(RepoError::RoomNotFound(_)) => {
                form.add_error("room_id", UNKNOWN_ROOM_MESSAGE);
                Ok(None)
            }
            Err(e) => {
                error!(code = %e.code(), room_id = %room_id, error = %e, "Room lookup failed");
                Err(e.into())
            }
        }
    }
}

/// Stay carried by the reservation form's date fields, if it has any.
fn submitted_stay(form: &mut Form) -> Option<StayPeriod> {
    if !form.has("start_date") && !form.has("end_date") {
        return None;
    }
    form.is_date("start_date");
    form.is_date("end_date");

    match StayPeriod::parse(form.get("start_date"), form.get("end_date")) {
        Ok(stay) => Some(stay),
        Err(_) => {
            if form.errors().get("start_date").is_none() && form.errors().get("end_date").is_none() {
                form.add_error("end_date", END_BEFORE_START_MESSAGE);
            }
            None
        }
    }
}
