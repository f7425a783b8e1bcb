//! Organizer dashboard DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::NavbarView;
use super::format;
use crate::domain::{
    CountedEvent, Event, EventId, EventParticipant, EventStatus, EventType, EventTypeId,
    OrganizerStats, User, UserId,
};
use crate::service::{EventForm, OrganizerPage};

/// A row of the organizer's event list.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizerEventView {
    /// Event id.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Event type id, for the edit form.
    pub type_id: EventTypeId,
    /// Event type name.
    pub type_name: Option<String>,
    /// Price.
    pub price: Decimal,
    /// Price label.
    pub price_label: String,
    /// Status.
    pub status: EventStatus,
    /// "Ativo" / "Inativo".
    pub status_label: &'static str,
    /// "Desativar" / "Ativar".
    pub toggle_label: &'static str,
    /// Tickets issued.
    pub participant_count: i64,
    /// Creation date, `dd/mm/yyyy`.
    pub created_on: String,
}

impl From<CountedEvent> for OrganizerEventView {
    fn from(counted: CountedEvent) -> Self {
        let event = counted.event;
        let active = event.status.is_active();
        Self {
            id: event.id,
            price_label: format::currency(event.price),
            created_on: format::date(event.created_at),
            title: event.title,
            description: event.description,
            type_id: event.type_id,
            type_name: counted.type_name,
            price: event.price,
            status: event.status,
            status_label: format::active_label(active),
            toggle_label: format::toggle_label(active),
            participant_count: counted.participant_count,
        }
    }
}

/// Response body for `GET /dashboard/organizer`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrganizerDashboardView {
    /// Navigation bar.
    pub navbar: NavbarView,
    /// The organizer's figures.
    pub stats: OrganizerStats,
    /// Revenue label.
    pub total_revenue_label: String,
    /// Event types by name.
    pub event_types: Vec<EventType>,
    /// Own events, newest first.
    pub events: Vec<OrganizerEventView>,
}

impl OrganizerDashboardView {
    /// Renders the page for `viewer`.
    #[must_use]
    pub fn new(page: OrganizerPage, viewer: &User) -> Self {
        Self {
            navbar: NavbarView::from(viewer),
            total_revenue_label: format::currency(page.stats.total_revenue),
            stats: page.stats,
            event_types: page.event_types,
            events: page.events.into_iter().map(OrganizerEventView::from).collect(),
        }
    }
}

/// A ticket holder in the participants dialog.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantView {
    /// User id.
    pub user_id: UserId,
    /// Name.
    pub name: String,
    /// E-mail.
    pub email: String,
    /// Registration date, `dd/mm/yyyy`.
    pub registered_on: String,
}

impl From<EventParticipant> for ParticipantView {
    fn from(p: EventParticipant) -> Self {
        Self {
            user_id: p.user_id,
            name: p.name,
            email: p.email,
            registered_on: format::date(p.registered_at),
        }
    }
}

/// Response body for `GET /dashboard/organizer/events/{id}/participants`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantListView {
    /// Event id.
    pub event_id: EventId,
    /// Event title.
    pub event_title: String,
    /// Number of ticket holders.
    pub total: usize,
    /// Ticket holders, newest first.
    pub participants: Vec<ParticipantView>,
}

impl ParticipantListView {
    /// Renders the participants of `event`.
    #[must_use]
    pub fn new(event: Event, participants: Vec<EventParticipant>) -> Self {
        Self {
            event_id: event.id,
            event_title: event.title,
            total: participants.len(),
            participants: participants.into_iter().map(ParticipantView::from).collect(),
        }
    }
}

/// Request body for creating or editing an event.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventRequest {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Event type.
    #[serde(default)]
    pub type_id: Option<EventTypeId>,
    /// Ticket price.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl From<EventRequest> for EventForm {
    fn from(req: EventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            type_id: req.type_id,
            price: req.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn inactive_event_row_offers_activation() {
        let counted = CountedEvent {
            event: Event {
                id: EventId::new(),
                title: "Tech Meetup".to_string(),
                description: String::new(),
                price: Decimal::new(1250, 2),
                status: EventStatus::Inactive,
                type_id: EventTypeId::new(),
                organizer_id: UserId::new(),
                created_at: Utc::now(),
            },
            type_name: Some("Meetup".to_string()),
            organizer_name: None,
            participant_count: 4,
        };
        let row = OrganizerEventView::from(counted);
        assert_eq!(row.status_label, "Inativo");
        assert_eq!(row.toggle_label, "Ativar");
        assert_eq!(row.price_label, "R$ 12.50");
        assert_eq!(row.participant_count, 4);
    }
}
