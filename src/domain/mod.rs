//! Domain layer: entity records, identifiers and roles.
//!
//! These types mirror the tables owned by the backend (`users`, `plans`,
//! `event_types`, `events`, `tickets`) plus the joined listings and
//! aggregate records the pages consume.

pub mod event;
pub mod ids;
pub mod role;
pub mod stats;
pub mod ticket;
pub mod user;

pub use event::{
    CountedEvent, Event, EventChanges, EventFilter, EventListing, EventStatus, EventType,
    NewEvent,
};
pub use ids::{EventId, EventTypeId, PlanId, TicketId, UserId};
pub use role::{BadgeVariant, Role};
pub use stats::{OrganizerStats, PlatformStats, SummaryCards};
pub use ticket::{EventParticipant, RegisteredEvent, Ticket};
pub use user::{NewUser, Plan, PlanInput, User};
