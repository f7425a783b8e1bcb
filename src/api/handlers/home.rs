//! Home page handler.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{FeaturedEventView, HomePageView, NavbarView};
use crate::api::guard::{cookie_headers, request_session};
use crate::app_state::AppState;
use crate::error::{AppError, ErrorResponse};

/// `GET /`: Home page with the featured events.
///
/// # Errors
///
/// Returns [`AppError`] when the backend fails.
#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    summary = "Home page",
    description = "Navbar for the current session, if any, and the active events with the most participants.",
    responses(
        (status = 200, description = "Home page", body = HomePageView),
        (status = 500, description = "Backend failure", body = ErrorResponse),
    )
)]
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let mut session = request_session(&headers, state.secure_cookies);
    let navbar = session.load().as_ref().map(NavbarView::from);
    let featured = state.catalog.featured_events().await?;

    let view = HomePageView {
        navbar,
        featured_events: featured.into_iter().map(FeaturedEventView::from).collect(),
    };
    Ok((cookie_headers(&session), Json(view)))
}

/// Home route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
