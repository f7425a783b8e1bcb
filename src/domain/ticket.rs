//! Tickets: the join between an event and a participant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, TicketId, UserId};

/// A row of the `tickets` table. Its existence means "is registered".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Primary key.
    pub id: TicketId,
    /// Event the ticket is for.
    pub event_id: EventId,
    /// Ticket holder.
    pub participant_id: UserId,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// A ticket joined with its holder, as listed for organizers.
#[derive(Debug, Clone)]
pub struct EventParticipant {
    /// Ticket holder id.
    pub user_id: UserId,
    /// Ticket holder name.
    pub name: String,
    /// Ticket holder e-mail.
    pub email: String,
    /// When the ticket was issued.
    pub registered_at: DateTime<Utc>,
}

/// A ticket joined with its event, type and organizer, as listed for the
/// ticket holder.
#[derive(Debug, Clone)]
pub struct RegisteredEvent {
    /// Event id.
    pub event_id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Event price.
    pub price: Decimal,
    /// Event type name.
    pub type_name: Option<String>,
    /// Organizer name.
    pub organizer_name: Option<String>,
    /// When the ticket was issued.
    pub registered_at: DateTime<Utc>,
}
