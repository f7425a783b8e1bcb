//! Home page DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::NavbarView;
use super::format;
use crate::domain::{CountedEvent, EventId};

/// A featured event card.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturedEventView {
    /// Event id.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Event type name.
    pub type_name: Option<String>,
    /// Price label.
    pub price_label: String,
    /// Tickets issued.
    pub participant_count: i64,
}

impl From<CountedEvent> for FeaturedEventView {
    fn from(counted: CountedEvent) -> Self {
        Self {
            id: counted.event.id,
            title: counted.event.title,
            description: counted.event.description,
            type_name: counted.type_name,
            price_label: format::currency(counted.event.price),
            participant_count: counted.participant_count,
        }
    }
}

/// Response body for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomePageView {
    /// Navbar, when logged in.
    pub navbar: Option<NavbarView>,
    /// Most popular active events.
    pub featured_events: Vec<FeaturedEventView>,
}
