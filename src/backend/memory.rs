//! In-process backend with the same semantics as the PostgreSQL one.
//!
//! All tables live behind a single [`tokio::sync::RwLock`]: reads proceed
//! concurrently, writes are serialized. Rows are kept in insertion order,
//! which is also creation order, so "newest first" is a reverse scan.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::{Backend, PlanOrder};
use crate::domain::{
    Event, EventChanges, EventFilter, EventId, EventListing, EventParticipant, EventStatus,
    EventType, EventTypeId, NewEvent, NewUser, OrganizerStats, Plan, PlanId, PlanInput,
    PlatformStats, RegisteredEvent, Role, Ticket, TicketId, User, UserId,
};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    plans: Vec<Plan>,
    event_types: Vec<EventType>,
    events: Vec<Event>,
    tickets: Vec<Ticket>,
}

impl Tables {
    fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn type_name(&self, id: EventTypeId) -> Option<String> {
        self.event_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.clone())
    }

    fn user_name(&self, id: UserId) -> Option<String> {
        self.user(id).map(|u| u.name.clone())
    }

    fn listing(&self, event: &Event) -> EventListing {
        EventListing {
            event: event.clone(),
            type_name: self.type_name(event.type_id),
            organizer_name: self.user_name(event.organizer_id),
            ticket_holders: self
                .tickets
                .iter()
                .filter(|t| t.event_id == event.id)
                .map(|t| t.participant_id)
                .collect(),
        }
    }

    /// Sum of the event price over the given tickets.
    fn revenue<'a>(&self, tickets: impl Iterator<Item = &'a Ticket>) -> Decimal {
        tickets
            .filter_map(|t| self.event(t.event_id))
            .map(|e| e.price)
            .sum()
    }
}

/// Backend keeping every table in memory.
///
/// Data does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Prices are stored with two fraction digits, like `NUMERIC(10,2)`.
fn money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().rev().cloned().collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict(format!(
                "e-mail já cadastrado: {}",
                new.email
            )));
        }
        if let Some(plan_id) = new.plan_id
            && !tables.plans.iter().any(|p| p.id == plan_id)
        {
            return Err(AppError::Conflict(format!("plano inexistente: {plan_id}")));
        }

        let user = User {
            id: UserId::new(),
            name: new.name,
            email: new.email,
            role: new.role,
            active: true,
            plan_id: new.plan_id,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn set_user_active(&self, id: UserId, active: bool) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("Usuário", id))?;
        user.active = active;
        Ok(user.clone())
    }

    async fn list_plans(&self, order: PlanOrder) -> Result<Vec<Plan>, AppError> {
        let tables = self.tables.read().await;
        let mut plans: Vec<Plan> = tables.plans.iter().rev().cloned().collect();
        if order == PlanOrder::PriceAscending {
            plans.sort_by(|a, b| a.price.cmp(&b.price));
        }
        Ok(plans)
    }

    async fn get_plan(&self, id: PlanId) -> Result<Option<Plan>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.plans.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_plan(&self, input: PlanInput) -> Result<Plan, AppError> {
        let plan = Plan {
            id: PlanId::new(),
            name: input.name,
            max_events: input.max_events,
            price: money(input.price),
            created_at: Utc::now(),
        };
        self.tables.write().await.plans.push(plan.clone());
        Ok(plan)
    }

    async fn update_plan(&self, id: PlanId, input: PlanInput) -> Result<Plan, AppError> {
        let mut tables = self.tables.write().await;
        let plan = tables
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Plano", id))?;
        plan.name = input.name;
        plan.max_events = input.max_events;
        plan.price = money(input.price);
        Ok(plan.clone())
    }

    async fn delete_plan(&self, id: PlanId) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if !tables.plans.iter().any(|p| p.id == id) {
            return Err(AppError::not_found("Plano", id));
        }
        if tables.users.iter().any(|u| u.plan_id == Some(id)) {
            return Err(AppError::Conflict(
                "plano em uso por pelo menos um organizador".to_string(),
            ));
        }
        tables.plans.retain(|p| p.id != id);
        Ok(())
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, AppError> {
        let tables = self.tables.read().await;
        let mut types = tables.event_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn insert_event_type(&self, name: &str) -> Result<EventType, AppError> {
        let mut tables = self.tables.write().await;
        if tables.event_types.iter().any(|t| t.name == name) {
            return Err(AppError::Conflict(format!(
                "tipo de evento já existe: {name}"
            )));
        }
        let event_type = EventType {
            id: EventTypeId::new(),
            name: name.to_string(),
        };
        tables.event_types.push(event_type.clone());
        Ok(event_type)
    }

    async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventListing>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .map(|e| tables.listing(e))
            .collect())
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, AppError> {
        Ok(self.tables.read().await.event(id).cloned())
    }

    async fn insert_event(&self, new: NewEvent) -> Result<Event, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.event_types.iter().any(|t| t.id == new.type_id) {
            return Err(AppError::Conflict(format!(
                "tipo de evento inexistente: {}",
                new.type_id
            )));
        }
        if tables.user(new.organizer_id).is_none() {
            return Err(AppError::Conflict(format!(
                "organizador inexistente: {}",
                new.organizer_id
            )));
        }

        let event = Event {
            id: EventId::new(),
            title: new.title,
            description: new.description,
            price: money(new.price),
            status: EventStatus::Active,
            type_id: new.type_id,
            organizer_id: new.organizer_id,
            created_at: Utc::now(),
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: EventId, changes: EventChanges) -> Result<Event, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.event_types.iter().any(|t| t.id == changes.type_id) {
            return Err(AppError::Conflict(format!(
                "tipo de evento inexistente: {}",
                changes.type_id
            )));
        }
        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found("Evento", id))?;
        event.title = changes.title;
        event.description = changes.description;
        event.type_id = changes.type_id;
        event.price = money(changes.price);
        Ok(event.clone())
    }

    async fn set_event_status(
        &self,
        id: EventId,
        status: EventStatus,
    ) -> Result<Event, AppError> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found("Evento", id))?;
        event.status = status;
        Ok(event.clone())
    }

    async fn delete_event(&self, id: EventId) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if tables.event(id).is_none() {
            return Err(AppError::not_found("Evento", id));
        }
        tables.events.retain(|e| e.id != id);
        tables.tickets.retain(|t| t.event_id != id);
        Ok(())
    }

    async fn count_events_by_organizer(&self, organizer_id: UserId) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(count(
            tables
                .events
                .iter()
                .filter(|e| e.organizer_id == organizer_id)
                .count(),
        ))
    }

    async fn find_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<Ticket>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .iter()
            .find(|t| t.event_id == event_id && t.participant_id == participant_id)
            .cloned())
    }

    async fn insert_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Ticket, AppError> {
        let mut tables = self.tables.write().await;
        if tables.event(event_id).is_none() {
            return Err(AppError::Conflict(format!("evento inexistente: {event_id}")));
        }
        if tables.user(participant_id).is_none() {
            return Err(AppError::Conflict(format!(
                "participante inexistente: {participant_id}"
            )));
        }
        if tables
            .tickets
            .iter()
            .any(|t| t.event_id == event_id && t.participant_id == participant_id)
        {
            return Err(AppError::Conflict(
                "ingresso duplicado para este evento".to_string(),
            ));
        }

        let ticket = Ticket {
            id: TicketId::new(),
            event_id,
            participant_id,
            created_at: Utc::now(),
        };
        tables.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn delete_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.tickets.len();
        tables
            .tickets
            .retain(|t| !(t.event_id == event_id && t.participant_id == participant_id));
        if tables.tickets.len() == before {
            return Err(AppError::not_found("Ingresso", event_id));
        }
        Ok(())
    }

    async fn count_tickets(&self, event_id: EventId) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(count(
            tables
                .tickets
                .iter()
                .filter(|t| t.event_id == event_id)
                .count(),
        ))
    }

    async fn list_event_participants(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventParticipant>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .iter()
            .rev()
            .filter(|t| t.event_id == event_id)
            .filter_map(|t| {
                tables.user(t.participant_id).map(|u| EventParticipant {
                    user_id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    registered_at: t.created_at,
                })
            })
            .collect())
    }

    async fn list_registered_events(
        &self,
        participant_id: UserId,
    ) -> Result<Vec<RegisteredEvent>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .iter()
            .rev()
            .filter(|t| t.participant_id == participant_id)
            .filter_map(|t| {
                tables.event(t.event_id).map(|e| RegisteredEvent {
                    event_id: e.id,
                    title: e.title.clone(),
                    description: e.description.clone(),
                    price: e.price,
                    type_name: tables.type_name(e.type_id),
                    organizer_name: tables.user_name(e.organizer_id),
                    registered_at: t.created_at,
                })
            })
            .collect())
    }

    async fn platform_stats(&self) -> Result<PlatformStats, AppError> {
        let tables = self.tables.read().await;
        let with_role = |role: Role| count(tables.users.iter().filter(|u| u.role == role).count());
        Ok(PlatformStats {
            total_users: count(tables.users.len()),
            total_organizers: with_role(Role::Organizer),
            total_participants: with_role(Role::Participant),
            total_events: count(tables.events.len()),
            active_events: count(tables.events.iter().filter(|e| e.status.is_active()).count()),
            total_registrations: count(tables.tickets.len()),
            total_revenue: tables.revenue(tables.tickets.iter()),
        })
    }

    async fn organizer_stats(&self, organizer_id: UserId) -> Result<OrganizerStats, AppError> {
        let tables = self.tables.read().await;
        let owned: Vec<&Event> = tables
            .events
            .iter()
            .filter(|e| e.organizer_id == organizer_id)
            .collect();
        let owned_tickets: Vec<&Ticket> = tables
            .tickets
            .iter()
            .filter(|t| owned.iter().any(|e| e.id == t.event_id))
            .collect();

        Ok(OrganizerStats {
            total_events: count(owned.len()),
            active_events: count(owned.iter().filter(|e| e.status.is_active()).count()),
            total_participants: count(owned_tickets.len()),
            total_revenue: tables.revenue(owned_tickets.into_iter()),
        })
    }
}
