//! PostgreSQL implementation of the backend.
//!
//! Tables and the two statistics functions are created by the migrations in
//! `migrations/`. Constraint violations surface as [`AppError::Conflict`]
//! through the `From<sqlx::Error>` conversion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Backend, PlanOrder};
use crate::domain::{
    Event, EventChanges, EventFilter, EventId, EventListing, EventParticipant, EventStatus,
    EventType, NewEvent, NewUser, OrganizerStats, Plan, PlanId, PlanInput, PlatformStats,
    RegisteredEvent, Ticket, User, UserId,
};
use crate::error::AppError;

const EVENT_COLUMNS: &str =
    "e.id, e.title, e.description, e.price, e.status, e.type_id, e.organizer_id, e.created_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    active: bool,
    plan_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            name: row.name,
            email: row.email,
            role: row
                .role
                .parse()
                .map_err(|e| AppError::Backend(format!("{e}")))?,
            active: row.active,
            plan_id: row.plan_id.map(PlanId::from),
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    max_events: i32,
    price: Decimal,
    created_at: DateTime<Utc>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            max_events: row.max_events,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventTypeRow {
    id: Uuid,
    name: String,
}

impl From<EventTypeRow> for EventType {
    fn from(row: EventTypeRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    status: String,
    type_id: Uuid,
    organizer_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.into(),
            title: row.title,
            description: row.description,
            price: row.price,
            status: parse_status(&row.status)?,
            type_id: row.type_id.into(),
            organizer_id: row.organizer_id.into(),
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    #[sqlx(flatten)]
    event: EventRow,
    type_name: Option<String>,
    organizer_name: Option<String>,
    ticket_holders: Vec<Uuid>,
}

impl TryFrom<ListingRow> for EventListing {
    type Error = AppError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event: row.event.try_into()?,
            type_name: row.type_name,
            organizer_name: row.organizer_name,
            ticket_holders: row.ticket_holders.into_iter().map(UserId::from).collect(),
        })
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    event_id: Uuid,
    participant_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id.into(),
            event_id: row.event_id.into(),
            participant_id: row.participant_id.into(),
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    user_id: Uuid,
    name: String,
    email: String,
    registered_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RegisteredRow {
    event_id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    type_name: Option<String>,
    organizer_name: Option<String>,
    registered_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PlatformStatsRow {
    total_users: i64,
    total_organizers: i64,
    total_participants: i64,
    total_events: i64,
    active_events: i64,
    total_registrations: i64,
    total_revenue: Decimal,
}

#[derive(sqlx::FromRow)]
struct OrganizerStatsRow {
    total_events: i64,
    active_events: i64,
    total_participants: i64,
    total_revenue: Decimal,
}

fn parse_status(raw: &str) -> Result<EventStatus, AppError> {
    raw.parse().map_err(|e| AppError::Backend(format!("{e}")))
}

/// PostgreSQL-backed data service using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Creates a backend over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, role, active, plan_id, created_at FROM users \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, role, active, plan_id, created_at FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, role, active, plan_id, created_at FROM users \
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, role, plan_id) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, role, active, plan_id, created_at",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.role.as_str())
        .bind(new.plan_id.map(Uuid::from))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn set_user_active(&self, id: UserId, active: bool) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET active = $2 WHERE id = $1 \
             RETURNING id, name, email, role, active, plan_id, created_at",
        )
        .bind(id.as_uuid())
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::not_found("Usuário", id))?
            .try_into()
    }

    async fn list_plans(&self, order: PlanOrder) -> Result<Vec<Plan>, AppError> {
        let sql = match order {
            PlanOrder::PriceAscending => {
                "SELECT id, name, max_events, price, created_at FROM plans ORDER BY price ASC"
            }
            PlanOrder::NewestFirst => {
                "SELECT id, name, max_events, price, created_at FROM plans ORDER BY created_at DESC"
            }
        };
        let rows = sqlx::query_as::<_, PlanRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Plan::from).collect())
    }

    async fn get_plan(&self, id: PlanId) -> Result<Option<Plan>, AppError> {
        let row = sqlx::query_as::<_, PlanRow>(
            "SELECT id, name, max_events, price, created_at FROM plans WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Plan::from))
    }

    async fn insert_plan(&self, input: PlanInput) -> Result<Plan, AppError> {
        let row = sqlx::query_as::<_, PlanRow>(
            "INSERT INTO plans (name, max_events, price) VALUES ($1, $2, $3) \
             RETURNING id, name, max_events, price, created_at",
        )
        .bind(&input.name)
        .bind(input.max_events)
        .bind(input.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_plan(&self, id: PlanId, input: PlanInput) -> Result<Plan, AppError> {
        let row = sqlx::query_as::<_, PlanRow>(
            "UPDATE plans SET name = $2, max_events = $3, price = $4 WHERE id = $1 \
             RETURNING id, name, max_events, price, created_at",
        )
        .bind(id.as_uuid())
        .bind(&input.name)
        .bind(input.max_events)
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Plan::from)
            .ok_or_else(|| AppError::not_found("Plano", id))
    }

    async fn delete_plan(&self, id: PlanId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Plano", id));
        }
        Ok(())
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, AppError> {
        let rows = sqlx::query_as::<_, EventTypeRow>(
            "SELECT id, name FROM event_types ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EventType::from).collect())
    }

    async fn insert_event_type(&self, name: &str) -> Result<EventType, AppError> {
        let row = sqlx::query_as::<_, EventTypeRow>(
            "INSERT INTO event_types (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_events(&self, filter: EventFilter) -> Result<Vec<EventListing>, AppError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS}, et.name AS type_name, u.name AS organizer_name, \
             COALESCE(array_agg(t.participant_id) FILTER (WHERE t.participant_id IS NOT NULL), \
             '{{}}') AS ticket_holders \
             FROM events e \
             LEFT JOIN event_types et ON et.id = e.type_id \
             LEFT JOIN users u ON u.id = e.organizer_id \
             LEFT JOIN tickets t ON t.event_id = e.id \
             WHERE ($1::uuid IS NULL OR e.organizer_id = $1) \
               AND ($2::text IS NULL OR e.status = $2) \
             GROUP BY e.id, et.name, u.name \
             ORDER BY e.created_at DESC"
        );
        let rows = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(filter.organizer_id.map(Uuid::from))
            .bind(filter.status.map(EventStatus::as_str))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EventListing::try_from).collect()
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1");
        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Event::try_from).transpose()
    }

    async fn insert_event(&self, new: NewEvent) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO events (title, description, price, type_id, organizer_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, description, price, status, type_id, organizer_id, created_at",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.type_id.as_uuid())
        .bind(new.organizer_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update_event(&self, id: EventId, changes: EventChanges) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            "UPDATE events SET title = $2, description = $3, type_id = $4, price = $5 \
             WHERE id = $1 \
             RETURNING id, title, description, price, status, type_id, organizer_id, created_at",
        )
        .bind(id.as_uuid())
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.type_id.as_uuid())
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::not_found("Evento", id))?
            .try_into()
    }

    async fn set_event_status(
        &self,
        id: EventId,
        status: EventStatus,
    ) -> Result<Event, AppError> {
        let row = sqlx::query_as::<_, EventRow>(
            "UPDATE events SET status = $2 WHERE id = $1 \
             RETURNING id, title, description, price, status, type_id, organizer_id, created_at",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::not_found("Evento", id))?
            .try_into()
    }

    async fn delete_event(&self, id: EventId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Evento", id));
        }
        Ok(())
    }

    async fn count_events_by_organizer(&self, organizer_id: UserId) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE organizer_id = $1")
                .bind(organizer_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<Ticket>, AppError> {
        let row = sqlx::query_as::<_, TicketRow>(
            "SELECT id, event_id, participant_id, created_at FROM tickets \
             WHERE event_id = $1 AND participant_id = $2",
        )
        .bind(event_id.as_uuid())
        .bind(participant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ticket::from))
    }

    async fn insert_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Ticket, AppError> {
        let row = sqlx::query_as::<_, TicketRow>(
            "INSERT INTO tickets (event_id, participant_id) VALUES ($1, $2) \
             RETURNING id, event_id, participant_id, created_at",
        )
        .bind(event_id.as_uuid())
        .bind(participant_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_ticket(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM tickets WHERE event_id = $1 AND participant_id = $2")
                .bind(event_id.as_uuid())
                .bind(participant_id.as_uuid())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Ingresso", event_id));
        }
        Ok(())
    }

    async fn count_tickets(&self, event_id: EventId) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_event_participants(
        &self,
        event_id: EventId,
    ) -> Result<Vec<EventParticipant>, AppError> {
        let rows = sqlx::query_as::<_, ParticipantRow>(
            "SELECT u.id AS user_id, u.name, u.email, t.created_at AS registered_at \
             FROM tickets t JOIN users u ON u.id = t.participant_id \
             WHERE t.event_id = $1 ORDER BY t.created_at DESC",
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| EventParticipant {
                user_id: row.user_id.into(),
                name: row.name,
                email: row.email,
                registered_at: row.registered_at,
            })
            .collect())
    }

    async fn list_registered_events(
        &self,
        participant_id: UserId,
    ) -> Result<Vec<RegisteredEvent>, AppError> {
        let rows = sqlx::query_as::<_, RegisteredRow>(
            "SELECT e.id AS event_id, e.title, e.description, e.price, \
             et.name AS type_name, u.name AS organizer_name, t.created_at AS registered_at \
             FROM tickets t \
             JOIN events e ON e.id = t.event_id \
             LEFT JOIN event_types et ON et.id = e.type_id \
             LEFT JOIN users u ON u.id = e.organizer_id \
             WHERE t.participant_id = $1 ORDER BY t.created_at DESC",
        )
        .bind(participant_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RegisteredEvent {
                event_id: row.event_id.into(),
                title: row.title,
                description: row.description,
                price: row.price,
                type_name: row.type_name,
                organizer_name: row.organizer_name,
                registered_at: row.registered_at,
            })
            .collect())
    }

    async fn platform_stats(&self) -> Result<PlatformStats, AppError> {
        let row = sqlx::query_as::<_, PlatformStatsRow>("SELECT * FROM get_platform_stats()")
            .fetch_one(&self.pool)
            .await?;

        Ok(PlatformStats {
            total_users: row.total_users,
            total_organizers: row.total_organizers,
            total_participants: row.total_participants,
            total_events: row.total_events,
            active_events: row.active_events,
            total_registrations: row.total_registrations,
            total_revenue: row.total_revenue,
        })
    }

    async fn organizer_stats(&self, organizer_id: UserId) -> Result<OrganizerStats, AppError> {
        let row =
            sqlx::query_as::<_, OrganizerStatsRow>("SELECT * FROM get_organizer_stats($1)")
                .bind(organizer_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(OrganizerStats {
            total_events: row.total_events,
            active_events: row.active_events,
            total_participants: row.total_participants,
            total_revenue: row.total_revenue,
        })
    }
}
