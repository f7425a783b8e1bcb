//! Participant dashboard handlers: browsing events and tickets.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use crate::api::dto::{MutationResponse, ParticipantDashboardView, ParticipantQuery, Toast};
use crate::api::guard::CurrentUser;
use crate::app_state::AppState;
use crate::domain::{EventId, User};
use crate::error::{AppError, ErrorResponse};
use crate::service::EventSearch;

async fn participant_page(
    state: &AppState,
    participant: &User,
    search: &EventSearch,
) -> Result<ParticipantDashboardView, AppError> {
    let page = state.participant.dashboard(participant, search).await?;
    Ok(ParticipantDashboardView::new(page, search, participant))
}

/// `GET /dashboard/participant`: Available events and held tickets.
///
/// # Errors
///
/// Returns [`AppError`] for a malformed type filter or a backend failure.
#[utoipa::path(
    get,
    path = "/dashboard/participant",
    tag = "Participant",
    summary = "Participant dashboard",
    description = "Active events filtered by search term and type, each flagged when the viewer already holds a ticket, plus the viewer's tickets.",
    params(ParticipantQuery),
    responses(
        (status = 200, description = "Participant dashboard", body = ParticipantDashboardView),
        (status = 303, description = "No session or not a participant; redirected to /login"),
        (status = 400, description = "Malformed type filter", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(participant)): Extension<CurrentUser>,
    Query(query): Query<ParticipantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let search = query.to_search()?;
    Ok(Json(participant_page(&state, &participant, &search).await?))
}

/// `POST /dashboard/participant/events/{id}/ticket`: Buy a ticket.
///
/// The same `search`/`type` query as the dashboard shapes the refetched page.
/// It is validated before the ticket is touched.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown or inactive event, or a ticket the
/// participant already holds.
#[utoipa::path(
    post,
    path = "/dashboard/participant/events/{id}/ticket",
    tag = "Participant",
    summary = "Register for an event",
    params(("id" = EventId, Path, description = "Event id"), ParticipantQuery),
    responses(
        (status = 201, description = "Ticket issued", body = MutationResponse<ParticipantDashboardView>),
        (status = 400, description = "Malformed type filter; no ticket issued", body = ErrorResponse),
        (status = 404, description = "Unknown event", body = ErrorResponse),
        (status = 409, description = "Inactive event or already registered", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Extension(CurrentUser(participant)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
    Query(query): Query<ParticipantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let search = query.to_search()?;
    state.participant.register(&participant, id).await?;
    let toast = Toast::success(
        "Ingresso adquirido!",
        "Você foi inscrito no evento com sucesso.",
    );
    let page = participant_page(&state, &participant, &search).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::new(toast, page))))
}

/// `DELETE /dashboard/participant/events/{id}/ticket`: Give a ticket back.
///
/// # Errors
///
/// Returns [`AppError`] when the participant holds no ticket for the event.
#[utoipa::path(
    delete,
    path = "/dashboard/participant/events/{id}/ticket",
    tag = "Participant",
    summary = "Cancel a registration",
    params(("id" = EventId, Path, description = "Event id"), ParticipantQuery),
    responses(
        (status = 200, description = "Ticket cancelled", body = MutationResponse<ParticipantDashboardView>),
        (status = 400, description = "Malformed type filter; ticket kept", body = ErrorResponse),
        (status = 404, description = "No ticket for this event", body = ErrorResponse),
    )
)]
pub async fn unregister(
    State(state): State<AppState>,
    Extension(CurrentUser(participant)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
    Query(query): Query<ParticipantQuery>,
) -> Result<impl IntoResponse, AppError> {
    let search = query.to_search()?;
    state.participant.unregister(&participant, id).await?;
    let toast = Toast::success("Inscrição cancelada", "Seu ingresso foi cancelado.");
    let page = participant_page(&state, &participant, &search).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// Participant routes, to be wrapped in the participant guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/participant", get(dashboard))
        .route(
            "/dashboard/participant/events/{id}/ticket",
            post(register).delete(unregister),
        )
}
