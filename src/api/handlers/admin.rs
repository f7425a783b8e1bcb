//! Admin dashboard handlers: users, events, plans and event types.
//!
//! Every mutation answers with a toast plus the refetched dashboard.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};

use super::status_word;
use crate::api::dto::{AdminDashboardView, EventTypeRequest, MutationResponse, PlanRequest, Toast};
use crate::api::guard::CurrentUser;
use crate::app_state::AppState;
use crate::domain::{EventId, PlanId, User, UserId};
use crate::error::{AppError, ErrorResponse};

async fn admin_page(state: &AppState, viewer: &User) -> Result<AdminDashboardView, AppError> {
    let page = state.admin.dashboard().await?;
    Ok(AdminDashboardView::new(page, viewer))
}

/// `GET /dashboard/admin`: Platform overview.
///
/// # Errors
///
/// Returns [`AppError`] when the backend fails.
#[utoipa::path(
    get,
    path = "/dashboard/admin",
    tag = "Admin",
    summary = "Admin dashboard",
    description = "Platform statistics, every user, plan, event type and event with its participant count, plus the derived summary cards.",
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboardView),
        (status = 303, description = "No session or not an admin; redirected to /login"),
        (status = 500, description = "Backend failure", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(admin_page(&state, &viewer).await?))
}

/// `POST /dashboard/admin/users/{id}/toggle-active`: Enable or disable a user.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown user or the admin's own account.
#[utoipa::path(
    post,
    path = "/dashboard/admin/users/{id}/toggle-active",
    tag = "Admin",
    summary = "Toggle a user's active flag",
    params(("id" = UserId, Path, description = "User id")),
    responses(
        (status = 200, description = "Flag flipped", body = MutationResponse<AdminDashboardView>),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 409, description = "Own account", body = ErrorResponse),
    )
)]
pub async fn toggle_user_active(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.admin.toggle_user_active(&viewer, id).await?;
    let toast = Toast::success(
        "Status atualizado",
        format!("Usuário {} com sucesso.", status_word(user.active)),
    );
    let page = admin_page(&state, &viewer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `POST /dashboard/admin/events/{id}/toggle-status`: Activate or deactivate any event.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown event.
#[utoipa::path(
    post,
    path = "/dashboard/admin/events/{id}/toggle-status",
    tag = "Admin",
    summary = "Toggle an event's status",
    params(("id" = EventId, Path, description = "Event id")),
    responses(
        (status = 200, description = "Status flipped", body = MutationResponse<AdminDashboardView>),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn toggle_event_status(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.admin.toggle_event_status(id).await?;
    let toast = Toast::success(
        "Status do evento atualizado",
        format!("Evento {} com sucesso.", status_word(event.status.is_active())),
    );
    let page = admin_page(&state, &viewer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `DELETE /dashboard/admin/events/{id}`: Delete any event with its tickets.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown event.
#[utoipa::path(
    delete,
    path = "/dashboard/admin/events/{id}",
    tag = "Admin",
    summary = "Delete an event",
    params(("id" = EventId, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = MutationResponse<AdminDashboardView>),
        (status = 404, description = "Unknown event", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<EventId>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.delete_event(id).await?;
    let toast = Toast::success("Evento excluído", "O evento foi removido permanentemente.");
    let page = admin_page(&state, &viewer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `POST /dashboard/admin/plans`: Create a subscription plan.
///
/// # Errors
///
/// Returns [`AppError`] for missing or out-of-range fields.
#[utoipa::path(
    post,
    path = "/dashboard/admin/plans",
    tag = "Admin",
    summary = "Create a plan",
    request_body = PlanRequest,
    responses(
        (status = 201, description = "Plan created", body = MutationResponse<AdminDashboardView>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
    )
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Json(req): Json<PlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.create_plan(req.into()).await?;
    let toast = Toast::success("Plano criado!", "Novo plano adicionado.");
    let page = admin_page(&state, &viewer).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::new(toast, page))))
}

/// `PUT /dashboard/admin/plans/{id}`: Overwrite a plan.
///
/// # Errors
///
/// Returns [`AppError`] for invalid fields or an unknown plan.
#[utoipa::path(
    put,
    path = "/dashboard/admin/plans/{id}",
    tag = "Admin",
    summary = "Update a plan",
    params(("id" = PlanId, Path, description = "Plan id")),
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Plan updated", body = MutationResponse<AdminDashboardView>),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 404, description = "Unknown plan", body = ErrorResponse),
    )
)]
pub async fn update_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<PlanId>,
    Json(req): Json<PlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.update_plan(id, req.into()).await?;
    let toast = Toast::success("Plano atualizado!", "Alterações salvas.");
    let page = admin_page(&state, &viewer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `DELETE /dashboard/admin/plans/{id}`: Delete a plan.
///
/// # Errors
///
/// Returns [`AppError`] for an unknown plan, or a conflict when organizers
/// still reference it.
#[utoipa::path(
    delete,
    path = "/dashboard/admin/plans/{id}",
    tag = "Admin",
    summary = "Delete a plan",
    params(("id" = PlanId, Path, description = "Plan id")),
    responses(
        (status = 200, description = "Plan deleted", body = MutationResponse<AdminDashboardView>),
        (status = 404, description = "Unknown plan", body = ErrorResponse),
        (status = 409, description = "Plan still referenced", body = ErrorResponse),
    )
)]
pub async fn delete_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Path(id): Path<PlanId>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.delete_plan(id).await?;
    let toast = Toast::success("Plano excluído", "Plano removido.");
    let page = admin_page(&state, &viewer).await?;
    Ok(Json(MutationResponse::new(toast, page)))
}

/// `POST /dashboard/admin/event-types`: Add an event category.
///
/// # Errors
///
/// Returns [`AppError`] for a blank or duplicate name.
#[utoipa::path(
    post,
    path = "/dashboard/admin/event-types",
    tag = "Admin",
    summary = "Create an event type",
    request_body = EventTypeRequest,
    responses(
        (status = 201, description = "Event type created", body = MutationResponse<AdminDashboardView>),
        (status = 400, description = "Blank name", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
    )
)]
pub async fn create_event_type(
    State(state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Json(req): Json<EventTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event_type = state.admin.create_event_type(&req.name).await?;
    let toast = Toast::success(
        "Tipo de evento criado!",
        format!("\"{}\" adicionado.", event_type.name),
    );
    let page = admin_page(&state, &viewer).await?;
    Ok((StatusCode::CREATED, Json(MutationResponse::new(toast, page))))
}

/// Admin routes, to be wrapped in the admin guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/admin", get(dashboard))
        .route(
            "/dashboard/admin/users/{id}/toggle-active",
            post(toggle_user_active),
        )
        .route(
            "/dashboard/admin/events/{id}/toggle-status",
            post(toggle_event_status),
        )
        .route("/dashboard/admin/events/{id}", delete(delete_event))
        .route("/dashboard/admin/plans", post(create_plan))
        .route(
            "/dashboard/admin/plans/{id}",
            put(update_plan).delete(delete_plan),
        )
        .route("/dashboard/admin/event-types", post(create_event_type))
}
