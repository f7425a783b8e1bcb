//! Participant dashboard: browsing active events and holding tickets.

use std::sync::Arc;

use crate::backend::Backend;
use crate::domain::{
    CountedEvent, EventFilter, EventId, EventStatus, EventType, EventTypeId, RegisteredEvent,
    Ticket, User, UserId,
};
use crate::error::AppError;

/// An active event as a participant sees it.
#[derive(Debug, Clone)]
pub struct AvailableEvent {
    /// The event with its names and participant count.
    pub event: CountedEvent,
    /// Whether the viewing participant holds a ticket.
    pub user_registered: bool,
}

/// Search box and type selector of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct EventSearch {
    /// Case-insensitive substring of title, description or organizer name.
    pub term: Option<String>,
    /// Only this event type; `None` means every type.
    pub type_id: Option<EventTypeId>,
}

impl EventSearch {
    /// Returns `true` if `event` passes both filters.
    #[must_use]
    pub fn matches(&self, event: &CountedEvent) -> bool {
        let term_matches = match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                [
                    Some(event.event.title.as_str()),
                    Some(event.event.description.as_str()),
                    event.organizer_name.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        };
        term_matches && self.type_id.is_none_or(|id| event.event.type_id == id)
    }
}

/// Everything the participant dashboard shows.
#[derive(Debug, Clone)]
pub struct ParticipantPage {
    /// Event types by name, for the type selector.
    pub event_types: Vec<EventType>,
    /// Active events passing the search, newest first.
    pub available: Vec<AvailableEvent>,
    /// Events the participant holds tickets for, newest ticket first.
    pub registered: Vec<RegisteredEvent>,
}

/// Participant dashboard page component.
#[derive(Debug, Clone)]
pub struct ParticipantService {
    backend: Arc<dyn Backend>,
}

impl ParticipantService {
    /// Creates the service.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Fetches the dashboard of `participant`, filtering available events
    /// with `search`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn dashboard(
        &self,
        participant: &User,
        search: &EventSearch,
    ) -> Result<ParticipantPage, AppError> {
        let event_types = self.backend.list_event_types().await?;
        let available = self
            .backend
            .list_events(EventFilter::by_status(EventStatus::Active))
            .await?
            .into_iter()
            .map(|listing| {
                let user_registered = listing.is_registered(participant.id);
                AvailableEvent {
                    event: CountedEvent::from(listing),
                    user_registered,
                }
            })
            .filter(|available| search.matches(&available.event))
            .collect();
        let registered = self.backend.list_registered_events(participant.id).await?;

        Ok(ParticipantPage {
            event_types,
            available,
            registered,
        })
    }

    /// Buys a ticket for an active event.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown event, [`AppError::Conflict`]
    /// for an inactive one, [`AppError::AlreadyRegistered`] when the
    /// participant already holds a ticket.
    pub async fn register(
        &self,
        participant: &User,
        event_id: EventId,
    ) -> Result<Ticket, AppError> {
        let event = self
            .backend
            .get_event(event_id)
            .await?
            .ok_or_else(|| AppError::not_found("Evento", event_id))?;
        if !event.status.is_active() {
            return Err(AppError::Conflict(
                "Este evento não está aberto para inscrições.".to_string(),
            ));
        }

        if self
            .backend
            .find_ticket(event_id, participant.id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyRegistered);
        }

        let ticket = match self.backend.insert_ticket(event_id, participant.id).await {
            Ok(ticket) => ticket,
            Err(err) => {
                return Err(self
                    .explain_rejected_ticket(err, event_id, participant.id)
                    .await);
            }
        };
        tracing::info!(%event_id, participant_id = %participant.id, "ticket issued");
        Ok(ticket)
    }

    /// A concurrent registration can win between the check and the insert,
    /// and then the uniqueness constraint rejects the loser. Only a conflict
    /// whose ticket now exists means "already registered". Any other
    /// conflict, such as the event vanishing, keeps the backend's message.
    async fn explain_rejected_ticket(
        &self,
        err: AppError,
        event_id: EventId,
        participant_id: UserId,
    ) -> AppError {
        if !matches!(err, AppError::Conflict(_)) {
            return err;
        }
        match self.backend.find_ticket(event_id, participant_id).await {
            Ok(Some(_)) => AppError::AlreadyRegistered,
            Ok(None) => err,
            Err(lookup) => lookup,
        }
    }

    /// Gives a ticket back.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the participant holds no ticket for the
    /// event.
    pub async fn unregister(&self, participant: &User, event_id: EventId) -> Result<(), AppError> {
        self.backend.delete_ticket(event_id, participant.id).await?;
        tracing::info!(%event_id, participant_id = %participant.id, "ticket cancelled");
        Ok(())
    }
}
