//! Events, event types and the joined listings pages display.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, EventTypeId, UserId};

/// Publication status of an event. Participants only see active events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Listed for participants.
    Active,
    /// Hidden from participants.
    Inactive,
}

impl EventStatus {
    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// The status a toggle switches to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    /// Returns `true` for [`EventStatus::Active`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name an event status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A row of the `event_types` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventType {
    /// Primary key.
    pub id: EventTypeId,
    /// Category name (e.g. "Workshop").
    pub name: String,
}

/// A row of the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Primary key.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Ticket price.
    pub price: Decimal,
    /// Publication status.
    pub status: EventStatus,
    /// Event type reference.
    pub type_id: EventTypeId,
    /// Owning organizer.
    pub organizer_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when inserting an event. New events start active.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Ticket price.
    pub price: Decimal,
    /// Event type reference.
    pub type_id: EventTypeId,
    /// Owning organizer.
    pub organizer_id: UserId,
}

/// Editable fields of an existing event.
#[derive(Debug, Clone)]
pub struct EventChanges {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Event type reference.
    pub type_id: EventTypeId,
    /// Ticket price.
    pub price: Decimal,
}

/// Equality predicates for event listings. `None` means "any".
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFilter {
    /// Only events owned by this organizer.
    pub organizer_id: Option<UserId>,
    /// Only events with this status.
    pub status: Option<EventStatus>,
}

impl EventFilter {
    /// Events owned by `organizer_id`.
    #[must_use]
    pub fn by_organizer(organizer_id: UserId) -> Self {
        Self {
            organizer_id: Some(organizer_id),
            status: None,
        }
    }

    /// Events with the given status.
    #[must_use]
    pub fn by_status(status: EventStatus) -> Self {
        Self {
            organizer_id: None,
            status: Some(status),
        }
    }

    /// Returns `true` if `event` satisfies every predicate.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        self.organizer_id.is_none_or(|id| event.organizer_id == id)
            && self.status.is_none_or(|s| event.status == s)
    }
}

/// An event joined with its type name, organizer name and ticket holders.
#[derive(Debug, Clone)]
pub struct EventListing {
    /// The event row.
    pub event: Event,
    /// Name of the referenced event type, if it still exists.
    pub type_name: Option<String>,
    /// Name of the owning organizer, if it still exists.
    pub organizer_name: Option<String>,
    /// Participants holding a ticket for this event.
    pub ticket_holders: Vec<UserId>,
}

impl EventListing {
    /// Number of tickets issued for the event.
    #[must_use]
    pub fn participant_count(&self) -> i64 {
        i64::try_from(self.ticket_holders.len()).unwrap_or(i64::MAX)
    }

    /// Returns `true` if `participant` holds a ticket.
    #[must_use]
    pub fn is_registered(&self, participant: UserId) -> bool {
        self.ticket_holders.contains(&participant)
    }
}

/// An event with its joined names and number of ticket holders.
#[derive(Debug, Clone)]
pub struct CountedEvent {
    /// The event row.
    pub event: Event,
    /// Name of the referenced event type.
    pub type_name: Option<String>,
    /// Name of the owning organizer.
    pub organizer_name: Option<String>,
    /// Tickets issued for the event.
    pub participant_count: i64,
}

impl CountedEvent {
    /// Pairs a listing with a count obtained separately.
    #[must_use]
    pub fn with_count(listing: EventListing, participant_count: i64) -> Self {
        Self {
            event: listing.event,
            type_name: listing.type_name,
            organizer_name: listing.organizer_name,
            participant_count,
        }
    }
}

impl From<EventListing> for CountedEvent {
    fn from(listing: EventListing) -> Self {
        let count = listing.participant_count();
        Self::with_count(listing, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(status: EventStatus, organizer_id: UserId) -> Event {
        Event {
            id: EventId::new(),
            title: "Tech Meetup".to_string(),
            description: String::new(),
            price: Decimal::ZERO,
            status,
            type_id: EventTypeId::new(),
            organizer_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn toggling_twice_restores_status() {
        for status in [EventStatus::Active, EventStatus::Inactive] {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("active".parse(), Ok(EventStatus::Active));
        assert_eq!("inactive".parse(), Ok(EventStatus::Inactive));
        assert!("archived".parse::<EventStatus>().is_err());
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = EventFilter::default();
        assert!(filter.matches(&event(EventStatus::Active, UserId::new())));
        assert!(filter.matches(&event(EventStatus::Inactive, UserId::new())));
    }

    #[test]
    fn filter_combines_predicates() {
        let owner = UserId::new();
        let filter = EventFilter {
            organizer_id: Some(owner),
            status: Some(EventStatus::Active),
        };
        assert!(filter.matches(&event(EventStatus::Active, owner)));
        assert!(!filter.matches(&event(EventStatus::Inactive, owner)));
        assert!(!filter.matches(&event(EventStatus::Active, UserId::new())));
    }

    #[test]
    fn listing_counts_ticket_holders() {
        let holder = UserId::new();
        let listing = EventListing {
            event: event(EventStatus::Active, UserId::new()),
            type_name: Some("Meetup".to_string()),
            organizer_name: None,
            ticket_holders: vec![holder, UserId::new()],
        };
        assert_eq!(listing.participant_count(), 2);
        assert!(listing.is_registered(holder));
        assert!(!listing.is_registered(UserId::new()));

        let counted = CountedEvent::from(listing);
        assert_eq!(counted.participant_count, 2);
        assert_eq!(counted.type_name.as_deref(), Some("Meetup"));
    }
}
