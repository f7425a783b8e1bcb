//! OpenAPI document covering every page endpoint.

use utoipa::OpenApi;

use crate::api::dto;
use crate::api::handlers::{admin, auth, home, organizer, participant, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "EventFlow",
        description = "Event management platform: participants buy tickets, organizers publish events within their plan, admins run the platform."
    ),
    paths(
        home::home,
        auth::login_page,
        auth::login,
        auth::logout,
        auth::register_page,
        auth::register,
        admin::dashboard,
        admin::toggle_user_active,
        admin::toggle_event_status,
        admin::delete_event,
        admin::create_plan,
        admin::update_plan,
        admin::delete_plan,
        admin::create_event_type,
        organizer::dashboard,
        organizer::create_event,
        organizer::update_event,
        organizer::delete_event,
        organizer::toggle_event_status,
        organizer::participants,
        participant::dashboard,
        participant::register,
        participant::unregister,
        system::health_handler,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        dto::Toast,
        dto::ToastVariant,
        dto::NavbarView,
        dto::NotFoundView,
    )),
    tags(
        (name = "Pages", description = "Public pages"),
        (name = "Auth", description = "Login, logout and registration"),
        (name = "Admin", description = "Admin dashboard"),
        (name = "Organizer", description = "Organizer dashboard"),
        (name = "Participant", description = "Participant dashboard"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;
