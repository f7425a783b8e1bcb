//! Organizer dashboard handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};

use super::status_word;
use crate::api::dto::{
    EventRequest, MutationResponse, OrganizerDashboardView, ParticipantListView, Toast,
};
use crate::api::guard::CurrentUser;
use crate::app_state::AppState;
use crate::domain::{EventId, User};
use crate::error::{AppError, ErrorResponse};

async fn organizer_page(
    state: &AppState,
    organizer: &User,
) -> Result<OrganizerDashboardView, AppError> {
    let page = state.organizer.dashboard(organizer).await?;
    Ok(OrganizerDashboardView::new(page, organizer))
}

/// `GET /dashboard/organizer`: The organizer's figures and events.
///
/// # Errors
///
/// Returns [`AppError`] when the backend fails.
#[utoipa::path(
    get,
    path = "/dashboard/organizer",
    tag = "Organizer",
    summary = "Organizer dashboard",
    responses(
        (status = 200, description = "Organizer dashboard", body = OrganizerDashboardView),
        (status = 303, description = "No session or not an organizer; redirected to /login"),
        (status = 500, description = "Backend failure", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(organizer_page(&state, &organizer).await?))
}

/// `POST /dashboard/organizer/events`: Create an event within the plan's cap.
///
/// # Errors
///
/// Returns [`AppError`] for invalid fields or an exhausted plan.
#[utoipa::path(
    post,
    path = "/dashboard/organizer/events",
    tag = "Organizer",
    summary = "Create an event",
    description = "New events start active. Organizers whose plan caps the number of events are refused once the cap is reached.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = MutationResponse<OrganizerDashboardView>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 422, description = "Plan limit reached", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.organizer.create_event(&organizer, req.into()).await?;
    let toast = Toast::success("Evento criado!", "Seu evento foi criado com sucesso.");
    let page = organizer_page(&state, &organizer).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::new(toast, page))))
}

/// `PUT /dashboard/organizer/events/{id}`: Edit an event.
///
/// # Errors
///
/// Returns [`AppError`] for invalid fields or an unknown event.
#[utoipa::path(
    put,
    path = "/dashboard/organizer/events/{id}",
    tag = "Organizer",
    summary = "Update an event",
    params(("id" = EventId, Path, description = "Event id")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = MutationResponse<OrganizerDashboardView>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.organizer.update_event(id, req.into()).await?;
    let toast = Toast::success("Evento atualizado!", "Suas alterações foram salvas.");
    let page = organizer_page(&state, &organizer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `DELETE /dashboard/organizer/events/{id}`: Delete an event with its tickets.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown event.
#[utoipa::path(
    delete,
    path = "/dashboard/organizer/events/{id}",
    tag = "Organizer",
    summary = "Delete an event",
    params(("id" = EventId, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = MutationResponse<OrganizerDashboardView>),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, AppError> {
    state.organizer.delete_event(id).await?;
    let toast = Toast::success("Evento excluído", "O evento foi removido com sucesso.");
    let page = organizer_page(&state, &organizer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `POST /dashboard/organizer/events/{id}/toggle-status`: Activate or deactivate an event.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown event.
#[utoipa::path(
    post,
    path = "/dashboard/organizer/events/{id}/toggle-status",
    tag = "Organizer",
    summary = "Toggle an event's status",
    params(("id" = EventId, Path, description = "Event id")),
    responses(
        (status = 200, description = "Status flipped", body = MutationResponse<OrganizerDashboardView>),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn toggle_event_status(
    State(state): State<AppState>,
    Extension(CurrentUser(organizer)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.organizer.toggle_event_status(id).await?;
    let toast = Toast::success(
        "Status atualizado",
        format!("Evento {} com sucesso.", status_word(event.status.is_active())),
    );
    let page = organizer_page(&state, &organizer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `GET /dashboard/organizer/events/{id}/participants`: Ticket holders of an event.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown event.
#[utoipa::path(
    get,
    path = "/dashboard/organizer/events/{id}/participants",
    tag = "Organizer",
    summary = "List an event's participants",
    params(("id" = EventId, Path, description = "Event id")),
    responses(
        (status = 200, description = "Ticket holders, newest first", body = ParticipantListView),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn participants(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, AppError> {
    let (event, participants) = state.organizer.participants(id).await?;
    Ok(Json(ParticipantListView::new(event, participants)))
}

/// Organizer routes, to be wrapped in the organizer guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/organizer", get(dashboard))
        .route("/dashboard/organizer/events", post(create_event))
        .route(
            "/dashboard/organizer/events/{id}",
            put(update_event).delete(delete_event),
        )
        .route(
            "/dashboard/organizer/events/{id}/toggle-status",
            post(toggle_event_status),
        )
        .route(
            "/dashboard/organizer/events/{id}/participants",
            get(participants),
        )
}
