//! Public catalog: the featured events on the home page.

use std::sync::Arc;

use super::count_each;
use crate::backend::Backend;
use crate::domain::{CountedEvent, EventFilter, EventStatus};
use crate::error::AppError;

/// Home page component.
#[derive(Debug, Clone)]
pub struct CatalogService {
    backend: Arc<dyn Backend>,
    featured_limit: usize,
}

impl CatalogService {
    /// Creates the service, featuring at most `featured_limit` events.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, featured_limit: usize) -> Self {
        Self {
            backend,
            featured_limit,
        }
    }

    /// Active events with the most participants.
    ///
    /// Ties keep the newest event first.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn featured_events(&self) -> Result<Vec<CountedEvent>, AppError> {
        let listings = self
            .backend
            .list_events(EventFilter::by_status(EventStatus::Active))
            .await?;
        let mut events = count_each(self.backend.as_ref(), listings).await?;
        events.sort_by(|a, b| b.participant_count.cmp(&a.participant_count));
        events.truncate(self.featured_limit);
        Ok(events)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::service::fixtures;

    #[tokio::test]
    async fn top_active_events_by_participants() {
        let backend = fixtures::backend();
        let org = fixtures::user(&backend, "Org", Role::Organizer, None).await;
        let ana = fixtures::user(&backend, "Ana", Role::Participant, None).await;
        let bia = fixtures::user(&backend, "Bia", Role::Participant, None).await;
        let caio = fixtures::user(&backend, "Caio", Role::Participant, None).await;
        let show = fixtures::event_type(&backend, "Show").await;

        let a = fixtures::event(&backend, &org, &show, "A").await;
        let b = fixtures::event(&backend, &org, &show, "B").await;
        let c = fixtures::event(&backend, &org, &show, "C").await;
        let d = fixtures::event(&backend, &org, &show, "D").await;

        // B: 3 tickets, D: 2 (but inactive), C: 1, A: 0
        let tickets = [
            (b.id, ana.id),
            (b.id, bia.id),
            (b.id, caio.id),
            (d.id, ana.id),
            (d.id, bia.id),
            (c.id, ana.id),
        ];
        for (event_id, who) in tickets {
            assert!(backend.insert_ticket(event_id, who).await.is_ok());
        }
        assert!(
            backend
                .set_event_status(d.id, EventStatus::Inactive)
                .await
                .is_ok()
        );

        let service = CatalogService::new(backend, 3);
        let Ok(featured) = service.featured_events().await else {
            panic!("featured failed");
        };
        let ids: Vec<_> = featured.iter().map(|e| e.event.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
        let counts: Vec<i64> = featured.iter().map(|e| e.participant_count).collect();
        assert_eq!(counts, vec![3, 1, 0]);
    }

    #[tokio::test]
    async fn empty_catalog_features_nothing() {
        let service = CatalogService::new(fixtures::backend(), 3);
        assert!(matches!(service.featured_events().await, Ok(v) if v.is_empty()));
    }
}
