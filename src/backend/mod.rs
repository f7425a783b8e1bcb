//! Data access layer: the hosted data service the pages talk to.
//!
//! [`Backend`] is a thin, table-shaped interface: select / insert / update /
//! delete with equality predicates, a handful of joins, and two
//! statistics calls whose aggregation happens entirely on the backend side.
//! Pages never cache what it returns; every page view refetches.
//!
//! Two implementations exist: [`PostgresBackend`] (tables and SQL functions
//! from `migrations/`) and [`MemoryBackend`] (the same semantics over
//! in-process tables, used when persistence is disabled and in tests).
//! Referential integrity is the backend's job: both reject duplicate
//! tickets and e-mails, refuse to delete a plan still referenced by a user,
//! and delete an event's tickets together with the event.

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    Event, EventChanges, EventFilter, EventId, EventListing, EventParticipant, EventStatus,
    EventType, NewEvent, NewUser, OrganizerStats, Plan, PlanId, PlanInput, PlatformStats,
    RegisteredEvent, Ticket, User, UserId,
};
use crate::error::AppError;

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

/// Sort order for plan listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOrder {
    /// Cheapest first (registration form).
    PriceAscending,
    /// Most recently created first (admin dashboard).
    NewestFirst,
}

/// Table-level operations against the data service.
///
/// Every list operation returns rows in the order the pages display them:
/// users, plans (unless asked otherwise), events and tickets newest first,
/// event types by name.
#[async_trait]
pub trait Backend: fmt::Debug + Send + Sync {
    /// Short name reported by the health check.
    fn name(&self) -> &'static str;

    // ── users ──────────────────────────────────────────────────────────

    /// Lists every user, newest first.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Fetches the user with the given e-mail.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts an active user.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] if the e-mail is taken or the plan is unknown.
    async fn insert_user(&self, new: NewUser) -> Result<User, AppError>;

    /// Sets the `active` flag of a user.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the user does not exist.
    async fn set_user_active(&self, id: UserId, active: bool) -> Result<User, AppError>;

    // ── plans ──────────────────────────────────────────────────────────

    /// Lists every plan in the given order.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_plans(&self, order: PlanOrder) -> Result<Vec<Plan>, AppError>;

    /// Fetches a plan by id.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn get_plan(&self, id: PlanId) -> Result<Option<Plan>, AppError>;

    /// Inserts a plan.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn insert_plan(&self, input: PlanInput) -> Result<Plan, AppError>;

    /// Overwrites the editable fields of a plan.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the plan does not exist.
    async fn update_plan(&self, id: PlanId, input: PlanInput) -> Result<Plan, AppError>;

    /// Deletes a plan.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the plan does not exist,
    /// [`AppError::Conflict`] if a user still references it.
    async fn delete_plan(&self, id: PlanId) -> Result<(), AppError>;

    // ── event types ────────────────────────────────────────────────────

    /// Lists every event type ordered by name.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_event_types(&self) -> Result<Vec<EventType>, AppError>;

    /// Inserts an event type.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] if the name is taken.
    async fn insert_event_type(&self, name: &str) -> Result<EventType, AppError>;

    // ── events ─────────────────────────────────────────────────────────

    /// Lists events matching `filter`, newest first, joined with type name,
    /// organizer name and ticket holders.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventListing>, AppError>;

    /// Fetches an event by id.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, AppError>;

    /// Inserts an active event.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] if the type or organizer does not exist.
    async fn insert_event(&self, new: NewEvent) -> Result<Event, AppError>;

    /// Overwrites the editable fields of an event.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the event does not exist.
    async fn update_event(&self, id: EventId, changes: EventChanges) -> Result<Event, AppError>;

    /// Sets the status of an event.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the event does not exist.
    async fn set_event_status(&self, id: EventId, status: EventStatus)
    -> Result<Event, AppError>;

    /// Deletes an event and its tickets.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if the event does not exist.
    async fn delete_event(&self, id: EventId) -> Result<(), AppError>;

    /// Counts the events owned by an organizer.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn count_events_by_organizer(&self, organizer_id: UserId) -> Result<i64, AppError>;

    // ── tickets ────────────────────────────────────────────────────────

    /// Fetches the ticket of `participant_id` for `event_id`, if any.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn find_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<Ticket>, AppError>;

    /// Issues a ticket.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] if the pair already holds a ticket or either
    /// row does not exist.
    async fn insert_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Ticket, AppError>;

    /// Deletes the ticket of `participant_id` for `event_id`.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] if there is no such ticket.
    async fn delete_ticket(&self, event_id: EventId, participant_id: UserId)
    -> Result<(), AppError>;

    /// Count-only query: number of tickets issued for an event.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn count_tickets(&self, event_id: EventId) -> Result<i64, AppError>;

    /// Lists the ticket holders of an event, newest ticket first.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_event_participants(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventParticipant>, AppError>;

    /// Lists the events a participant holds tickets for, newest ticket first.
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn list_registered_events(
        &self,
        participant_id: UserId,
    ) -> Result<Vec<RegisteredEvent>, AppError>;

    // ── statistics ─────────────────────────────────────────────────────

    /// Platform-wide aggregate (`get_platform_stats()`).
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn platform_stats(&self) -> Result<PlatformStats, AppError>;

    /// Aggregate for one organizer (`get_organizer_stats(organizer_user_id)`).
    ///
    /// # Errors
    ///
    /// [`AppError::Backend`] if the data service fails.
    async fn organizer_stats(&self, organizer_id: UserId) -> Result<OrganizerStats, AppError>;
}
