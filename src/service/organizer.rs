//! Organizer dashboard: an organizer's own events.
//!
//! Mutations only pass the role guard; they do not check that the event
//! belongs to the caller.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::require;
use crate::backend::Backend;
use crate::domain::{
    CountedEvent, Event, EventChanges, EventFilter, EventId, EventParticipant, EventType,
    EventTypeId, NewEvent, OrganizerStats, User,
};
use crate::error::AppError;

/// Everything the organizer dashboard shows.
#[derive(Debug, Clone)]
pub struct OrganizerPage {
    /// The organizer's aggregate figures.
    pub stats: OrganizerStats,
    /// Event types by name, for the event form.
    pub event_types: Vec<EventType>,
    /// Own events, newest first.
    pub events: Vec<CountedEvent>,
}

/// Fields of the create/edit event form.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    /// Title; required.
    pub title: String,
    /// Description; optional.
    pub description: String,
    /// Event type; required.
    pub type_id: Option<EventTypeId>,
    /// Ticket price; required, zero allowed.
    pub price: Option<Decimal>,
}

impl EventForm {
    fn validate(self) -> Result<EventChanges, AppError> {
        require(&[("título", self.title.as_str())])?;
        let (Some(type_id), Some(price)) = (self.type_id, self.price) else {
            return Err(AppError::MissingFields("tipo, preço".to_string()));
        };
        if price.is_sign_negative() {
            return Err(AppError::InvalidRequest(
                "O preço não pode ser negativo.".to_string(),
            ));
        }
        Ok(EventChanges {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            type_id,
            price,
        })
    }
}

/// Organizer dashboard page component.
#[derive(Debug, Clone)]
pub struct OrganizerService {
    backend: Arc<dyn Backend>,
}

impl OrganizerService {
    /// Creates the service.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Fetches the dashboard of `organizer`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn dashboard(&self, organizer: &User) -> Result<OrganizerPage, AppError> {
        let stats = self.backend.organizer_stats(organizer.id).await?;
        let event_types = self.backend.list_event_types().await?;
        let events = self
            .backend
            .list_events(EventFilter::by_organizer(organizer.id))
            .await?
            .into_iter()
            .map(CountedEvent::from)
            .collect();

        Ok(OrganizerPage {
            stats,
            event_types,
            events,
        })
    }

    /// Publishes a new, active event.
    ///
    /// An organizer without a plan, or whose plan no longer exists, is not
    /// limited.
    ///
    /// # Errors
    ///
    /// Form errors, or [`AppError::PlanLimitReached`] when the plan's event
    /// cap is already used up.
    pub async fn create_event(&self, organizer: &User, form: EventForm) -> Result<Event, AppError> {
        let fields = form.validate()?;

        if let Some(plan_id) = organizer.plan_id
            && let Some(plan) = self.backend.get_plan(plan_id).await?
        {
            let existing = self.backend.count_events_by_organizer(organizer.id).await?;
            if !plan.allows_another(existing) {
                return Err(AppError::PlanLimitReached {
                    max_events: plan.max_events,
                });
            }
        }

        let event = self
            .backend
            .insert_event(NewEvent {
                title: fields.title,
                description: fields.description,
                price: fields.price,
                type_id: fields.type_id,
                organizer_id: organizer.id,
            })
            .await?;
        tracing::info!(event_id = %event.id, organizer_id = %organizer.id, "event created");
        Ok(event)
    }

    /// Overwrites title, description, type and price of an event.
    ///
    /// # Errors
    ///
    /// Form errors, or [`AppError::NotFound`] for an unknown event.
    pub async fn update_event(&self, id: EventId, form: EventForm) -> Result<Event, AppError> {
        let event = self.backend.update_event(id, form.validate()?).await?;
        tracing::info!(event_id = %id, "event updated");
        Ok(event)
    }

    /// Flips an event between active and inactive.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown event.
    pub async fn toggle_event_status(&self, id: EventId) -> Result<Event, AppError> {
        let event = self
            .backend
            .get_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Evento", id))?;

        let updated = self
            .backend
            .set_event_status(id, event.status.toggled())
            .await?;
        tracing::info!(event_id = %id, status = %updated.status, "event status changed");
        Ok(updated)
    }

    /// Deletes an event together with its tickets.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown event.
    pub async fn delete_event(&self, id: EventId) -> Result<(), AppError> {
        self.backend.delete_event(id).await?;
        tracing::info!(event_id = %id, "event deleted");
        Ok(())
    }

    /// Ticket holders of an event, newest ticket first.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown event.
    pub async fn participants(
        &self,
        id: EventId,
    ) -> Result<(Event, Vec<EventParticipant>), AppError> {
        let event = self
            .backend
            .get_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Evento", id))?;
        let participants = self.backend.list_event_participants(id).await?;
        Ok((event, participants))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventStatus, Role};
    use crate::service::fixtures;

    fn form(title: &str, type_id: EventTypeId, price: Decimal) -> EventForm {
        EventForm {
            title: title.to_string(),
            description: String::new(),
            type_id: Some(type_id),
            price: Some(price),
        }
    }

    #[tokio::test]
    async fn created_event_starts_active_and_is_listed() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        let service = OrganizerService::new(Arc::clone(&backend));

        let Ok(event) = service
            .create_event(&org, form("Tech Meetup", meetup.id, Decimal::ZERO))
            .await
        else {
            panic!("create failed");
        };
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(event.organizer_id, org.id);

        let Ok(page) = service.dashboard(&org).await else {
            panic!("dashboard failed");
        };
        assert_eq!(page.stats.total_events, 1);
        assert_eq!(page.events.len(), 1);
        assert!(
            page.events
                .iter()
                .all(|e| e.type_name.as_deref() == Some("Meetup") && e.participant_count == 0)
        );
    }

    #[tokio::test]
    async fn dashboard_shows_only_own_events() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let other = fixtures::user(&backend, "Outro", Role::Organizer, None).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        fixtures::event(&backend, &other, &meetup, "Alheio").await;
        let mine = fixtures::event(&backend, &org, &meetup, "Meu").await;

        let service = OrganizerService::new(backend);
        let Ok(page) = service.dashboard(&org).await else {
            panic!("dashboard failed");
        };
        let ids: Vec<EventId> = page.events.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, vec![mine.id]);
    }

    #[tokio::test]
    async fn plan_limit_blocks_extra_events() {
        let backend = fixtures::backend();
        let plan = fixtures::plan(&backend, 1).await;
        let org = fixtures::user(&backend, "Org", Role::Organizer, Some(plan.id)).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        let service = OrganizerService::new(backend);

        assert!(
            service
                .create_event(&org, form("Primeiro", meetup.id, Decimal::ONE))
                .await
                .is_ok()
        );
        let second = service
            .create_event(&org, form("Segundo", meetup.id, Decimal::ONE))
            .await;
        assert!(matches!(
            second,
            Err(AppError::PlanLimitReached { max_events: 1 })
        ));
    }

    #[tokio::test]
    async fn unlimited_plan_and_no_plan_are_not_capped() {
        let backend = fixtures::backend();
        let unlimited = fixtures::plan(&backend, -1).await;
        let capped_out = fixtures::user(&backend, "Org", Role::Organizer, Some(unlimited.id)).await;
        let planless = fixtures::user(&backend, "Livre", Role::Organizer, None).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        let service = OrganizerService::new(backend);

        for organizer in [&capped_out, &planless] {
            for n in 0..3 {
                let result = service
                    .create_event(organizer, form(&format!("Evento {n}"), meetup.id, Decimal::ONE))
                    .await;
                assert!(result.is_ok());
            }
        }
    }

    #[tokio::test]
    async fn form_requires_title_type_and_price() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let service = OrganizerService::new(backend);

        let no_title = EventForm {
            price: Some(Decimal::ONE),
            type_id: Some(EventTypeId::new()),
            ..EventForm::default()
        };
        assert!(matches!(
            service.create_event(&org, no_title).await,
            Err(AppError::MissingFields(_))
        ));

        let no_price = EventForm {
            title: "Show".to_string(),
            type_id: Some(EventTypeId::new()),
            ..EventForm::default()
        };
        assert!(matches!(
            service.create_event(&org, no_price).await,
            Err(AppError::MissingFields(_))
        ));
    }

    #[tokio::test]
    async fn edit_toggle_and_delete() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        let talk = fixtures::event_type(&backend, "Palestra").await;
        let event = fixtures::event(&backend, &org, &meetup, "Rust Night").await;
        let service = OrganizerService::new(Arc::clone(&backend));

        let Ok(edited) = service
            .update_event(event.id, form("Rust Night II", talk.id, Decimal::new(1250, 2)))
            .await
        else {
            panic!("update failed");
        };
        assert_eq!(edited.title, "Rust Night II");
        assert_eq!(edited.type_id, talk.id);
        assert_eq!(edited.status, EventStatus::Active);

        let Ok(toggled) = service.toggle_event_status(event.id).await else {
            panic!("toggle failed");
        };
        assert_eq!(toggled.status, EventStatus::Inactive);
        let Ok(back) = service.toggle_event_status(event.id).await else {
            panic!("toggle failed");
        };
        assert_eq!(back.status, EventStatus::Active);

        assert!(service.delete_event(event.id).await.is_ok());
        assert!(matches!(
            service.toggle_event_status(event.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn participants_are_listed_newest_first() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let ana = fixtures::user(&backend, "Ana", Role::Participant, None).await;
        let bia = fixtures::user(&backend, "Bia", Role::Participant, None).await;
        let meetup = fixtures::event_type(&backend, "Meetup").await;
        let event = fixtures::event(&backend, &org, &meetup, "Meetup").await;
        for who in [ana.id, bia.id] {
            assert!(backend.insert_ticket(event.id, who).await.is_ok());
        }

        let service = OrganizerService::new(backend);
        let Ok((listed, participants)) = service.participants(event.id).await else {
            panic!("participants failed");
        };
        assert_eq!(listed.id, event.id);
        let names: Vec<&str> = participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bia", "Ana"]);

        assert!(matches!(
            service.participants(EventId::new()).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
