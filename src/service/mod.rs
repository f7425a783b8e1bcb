//! Service layer: the page components.
//!
//! Each service fetches what one page shows and performs the page's
//! mutations against a shared [`Backend`]. Services hold no state of their
//! own: every call goes to the backend and every mutation is followed by a
//! fresh page fetch in the handler.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod organizer;
pub mod participant;

pub use account::{AccountService, Registration};
pub use admin::{AdminPage, AdminService, PlanForm};
pub use catalog::CatalogService;
pub use organizer::{EventForm, OrganizerPage, OrganizerService};
pub use participant::{AvailableEvent, EventSearch, ParticipantPage, ParticipantService};

use futures_util::future::try_join_all;

use crate::backend::Backend;
use crate::domain::{CountedEvent, EventListing};
use crate::error::AppError;

/// Pairs every listing with a count-only ticket query, one per event,
/// issued concurrently.
async fn count_each(
    backend: &dyn Backend,
    listings: Vec<EventListing>,
) -> Result<Vec<CountedEvent>, AppError> {
    let counts =
        try_join_all(listings.iter().map(|l| backend.count_tickets(l.event.id))).await?;
    Ok(listings
        .into_iter()
        .zip(counts)
        .map(|(listing, count)| CountedEvent::with_count(listing, count))
        .collect())
}

/// Rejects blank required fields, naming the first one missing.
fn require(fields: &[(&'static str, &str)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(AppError::MissingFields((*name).to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::backend::{Backend, MemoryBackend};
    use crate::domain::{
        Event, EventType, NewEvent, NewUser, Plan, PlanId, PlanInput, Role, User,
    };

    pub(crate) fn backend() -> Arc<dyn Backend> {
        Arc::new(MemoryBackend::new())
    }

    pub(crate) async fn user(
        backend: &Arc<dyn Backend>,
        name: &str,
        role: Role,
        plan_id: Option<PlanId>,
    ) -> User {
        let new = NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            plan_id,
        };
        let Ok(user) = backend.insert_user(new).await else {
            panic!("insert user failed");
        };
        user
    }

    pub(crate) async fn plan(backend: &Arc<dyn Backend>, max_events: i32) -> Plan {
        let input = PlanInput {
            name: format!("Plano {max_events}"),
            max_events,
            price: Decimal::new(2990, 2),
        };
        let Ok(plan) = backend.insert_plan(input).await else {
            panic!("insert plan failed");
        };
        plan
    }

    pub(crate) async fn event_type(backend: &Arc<dyn Backend>, name: &str) -> EventType {
        let Ok(t) = backend.insert_event_type(name).await else {
            panic!("insert event type failed");
        };
        t
    }

    pub(crate) async fn event(
        backend: &Arc<dyn Backend>,
        organizer: &User,
        event_type: &EventType,
        title: &str,
    ) -> Event {
        let new = NewEvent {
            title: title.to_string(),
            description: format!("Descrição de {title}"),
            price: Decimal::ZERO,
            type_id: event_type.id,
            organizer_id: organizer.id,
        };
        let Ok(event) = backend.insert_event(new).await else {
            panic!("insert event failed");
        };
        event
    }
}
