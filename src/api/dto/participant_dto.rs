//! Participant dashboard DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::NavbarView;
use super::format;
use crate::domain::{EventId, EventType, EventTypeId, RegisteredEvent, User};
use crate::error::AppError;
use crate::service::{AvailableEvent, EventSearch, ParticipantPage};

/// Value of the type selector meaning "every type".
pub const ALL_TYPES: &str = "all";

/// Query parameters of `GET /dashboard/participant`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantQuery {
    /// Search term matched against title, description and organizer name.
    pub search: Option<String>,
    /// `all` or an event type id.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

impl ParticipantQuery {
    /// Converts the query into a search.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidRequest`] when `type` is neither `all` nor an id.
    pub fn to_search(&self) -> Result<EventSearch, AppError> {
        let type_id = match self.event_type.as_deref().map(str::trim) {
            None | Some("" | ALL_TYPES) => None,
            Some(raw) => Some(
                raw.parse::<uuid::Uuid>()
                    .map(EventTypeId::from)
                    .map_err(|_| AppError::InvalidRequest(format!("tipo inválido: {raw}")))?,
            ),
        };
        Ok(EventSearch {
            term: self.search.clone(),
            type_id,
        })
    }
}

/// An event card in the "available" list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableEventView {
    /// Event id.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Event type id.
    pub type_id: EventTypeId,
    /// Event type name.
    pub type_name: Option<String>,
    /// Organizer name.
    pub organizer_name: Option<String>,
    /// Price label.
    pub price_label: String,
    /// Tickets issued.
    pub participant_count: i64,
    /// Whether the viewer already holds a ticket.
    pub user_registered: bool,
}

impl From<AvailableEvent> for AvailableEventView {
    fn from(available: AvailableEvent) -> Self {
        let counted = available.event;
        Self {
            id: counted.event.id,
            price_label: format::currency(counted.event.price),
            title: counted.event.title,
            description: counted.event.description,
            type_id: counted.event.type_id,
            type_name: counted.type_name,
            organizer_name: counted.organizer_name,
            participant_count: counted.participant_count,
            user_registered: available.user_registered,
        }
    }
}

/// An event card in the "my tickets" list.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredEventView {
    /// Event id.
    pub event_id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Event type name.
    pub type_name: Option<String>,
    /// Organizer name.
    pub organizer_name: Option<String>,
    /// Price label.
    pub price_label: String,
    /// Ticket date, `dd/mm/yyyy HH:MM`.
    pub registered_at: String,
}

impl From<RegisteredEvent> for RegisteredEventView {
    fn from(r: RegisteredEvent) -> Self {
        Self {
            event_id: r.event_id,
            title: r.title,
            description: r.description,
            type_name: r.type_name,
            organizer_name: r.organizer_name,
            price_label: format::currency(r.price),
            registered_at: format::date_time(r.registered_at),
        }
    }
}

/// Response body for `GET /dashboard/participant`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantDashboardView {
    /// Navigation bar.
    pub navbar: NavbarView,
    /// Event types by name.
    pub event_types: Vec<EventType>,
    /// Search term echoed back.
    pub search: Option<String>,
    /// Selected type: `all` or a type id.
    pub type_filter: String,
    /// Active events passing the filters, newest first.
    pub available_events: Vec<AvailableEventView>,
    /// Events with a ticket, newest ticket first.
    pub registered_events: Vec<RegisteredEventView>,
    /// Number of tickets held.
    pub registered_count: usize,
}

impl ParticipantDashboardView {
    /// Renders the page for `viewer` under `search`.
    #[must_use]
    pub fn new(page: ParticipantPage, search: &EventSearch, viewer: &User) -> Self {
        Self {
            navbar: NavbarView::from(viewer),
            event_types: page.event_types,
            search: search.term.clone(),
            type_filter: search
                .type_id
                .map_or_else(|| ALL_TYPES.to_string(), |id| id.to_string()),
            available_events: page
                .available
                .into_iter()
                .map(AvailableEventView::from)
                .collect(),
            registered_count: page.registered.len(),
            registered_events: page
                .registered
                .into_iter()
                .map(RegisteredEventView::from)
                .collect(),
        }
    }
}
