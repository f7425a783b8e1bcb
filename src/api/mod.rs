//! HTTP layer: route guard, handlers, DTOs, and router composition.
//!
//! Public pages sit at the root; each dashboard lives under
//! `/dashboard/<role>` behind a [`guard::RouteGuard`] for that role.

pub mod dto;
pub mod guard;
pub mod handlers;
pub mod openapi;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::domain::Role;
use guard::{GuardState, RouteGuard};

/// Wraps every route of `routes` in a guard admitting only `role`.
fn protected(routes: Router<AppState>, state: &AppState, role: Role) -> Router<AppState> {
    let guard_state = GuardState {
        guard: RouteGuard::only(role),
        secure_cookies: state.secure_cookies,
    };
    routes.route_layer(middleware::from_fn_with_state(guard_state, guard::enforce))
}

/// Builds the page router: public pages plus the three guarded dashboards.
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(handlers::home::routes())
        .merge(handlers::auth::routes())
        .merge(handlers::system::routes())
        .merge(protected(handlers::admin::routes(), state, Role::Admin))
        .merge(protected(
            handlers::organizer::routes(),
            state,
            Role::Organizer,
        ))
        .merge(protected(
            handlers::participant::routes(),
            state,
            Role::Participant,
        ))
}

/// Builds the complete application: pages, the not-found fallback, API
/// docs, tracing and CORS.
pub fn build_app(state: AppState) -> Router {
    let router = build_router(&state).fallback(handlers::system::not_found);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
