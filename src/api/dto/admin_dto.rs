//! Admin dashboard DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::NavbarView;
use super::format;
use crate::domain::{
    BadgeVariant, CountedEvent, EventId, EventStatus, EventType, Plan, PlanId, PlatformStats,
    Role, SummaryCards, User, UserId,
};
use crate::service::{AdminPage, PlanForm};

/// A row of the admin user list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminUserView {
    /// User id.
    pub id: UserId,
    /// Name.
    pub name: String,
    /// E-mail.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Role label.
    pub role_label: &'static str,
    /// Badge next to the role.
    pub badge_variant: BadgeVariant,
    /// Whether the account is enabled.
    pub active: bool,
    /// "Ativo" / "Inativo".
    pub active_label: &'static str,
    /// "Desativar" / "Ativar".
    pub toggle_label: &'static str,
    /// `false` for the viewing admin's own row.
    pub can_toggle: bool,
    /// Registration date, `dd/mm/yyyy`.
    pub registered_on: String,
}

impl AdminUserView {
    fn new(user: User, viewer: &User) -> Self {
        Self {
            can_toggle: user.id != viewer.id,
            role_label: user.role.label(),
            badge_variant: user.role.badge_variant(),
            active_label: format::active_label(user.active),
            toggle_label: format::toggle_label(user.active),
            registered_on: format::date(user.created_at),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            active: user.active,
        }
    }
}

/// A plan card.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanView {
    /// Plan id.
    pub id: PlanId,
    /// Name.
    pub name: String,
    /// Event cap, `-1` for unlimited.
    pub max_events: i32,
    /// "Ilimitado" / "N eventos".
    pub limit_label: String,
    /// Price.
    pub price: Decimal,
    /// Price label.
    pub price_label: String,
}

impl From<Plan> for PlanView {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id,
            limit_label: format::plan_limit(plan.max_events),
            price_label: format::currency(plan.price),
            name: plan.name,
            max_events: plan.max_events,
            price: plan.price,
        }
    }
}

/// A row of the admin event list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminEventView {
    /// Event id.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status.
    pub status: EventStatus,
    /// "Ativo" / "Inativo".
    pub status_label: &'static str,
    /// "Desativar" / "Ativar".
    pub toggle_label: &'static str,
    /// Event type name.
    pub type_name: Option<String>,
    /// Organizer name.
    pub organizer_name: Option<String>,
    /// Price label.
    pub price_label: String,
    /// Tickets issued.
    pub participant_count: i64,
    /// Creation date, `dd/mm/yyyy`.
    pub created_on: String,
}

impl From<CountedEvent> for AdminEventView {
    fn from(counted: CountedEvent) -> Self {
        let active = counted.event.status.is_active();
        Self {
            id: counted.event.id,
            title: counted.event.title,
            description: counted.event.description,
            status: counted.event.status,
            status_label: format::active_label(active),
            toggle_label: format::toggle_label(active),
            type_name: counted.type_name,
            organizer_name: counted.organizer_name,
            price_label: format::currency(counted.event.price),
            participant_count: counted.participant_count,
            created_on: format::date(counted.event.created_at),
        }
    }
}

/// Summary cards under the event list.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryCardsView {
    /// "Usuários ativos".
    pub active_users: i64,
    /// "Eventos ativos".
    pub active_events: i64,
    /// Active events as a rounded percentage.
    pub active_rate_percent: i64,
    /// "67%".
    pub active_rate_label: String,
    /// Mean participants per event, rounded.
    pub average_participants: i64,
    /// Mean revenue per event.
    pub average_revenue: Decimal,
    /// Mean revenue label.
    pub average_revenue_label: String,
}

impl From<SummaryCards> for SummaryCardsView {
    fn from(cards: SummaryCards) -> Self {
        Self {
            active_users: cards.active_users,
            active_events: cards.active_events,
            active_rate_percent: cards.active_rate_percent,
            active_rate_label: format!("{}%", cards.active_rate_percent),
            average_participants: cards.average_participants,
            average_revenue: cards.average_revenue,
            average_revenue_label: format::currency(cards.average_revenue),
        }
    }
}

/// Response body for `GET /dashboard/admin`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDashboardView {
    /// Navigation bar.
    pub navbar: NavbarView,
    /// Platform counters.
    pub stats: PlatformStats,
    /// Total revenue label.
    pub total_revenue_label: String,
    /// Derived cards.
    pub summary: SummaryCardsView,
    /// Every user, newest first.
    pub users: Vec<AdminUserView>,
    /// Every plan, newest first.
    pub plans: Vec<PlanView>,
    /// Event types by name.
    pub event_types: Vec<EventType>,
    /// Every event, newest first.
    pub events: Vec<AdminEventView>,
}

impl AdminDashboardView {
    /// Renders the page for `viewer`.
    #[must_use]
    pub fn new(page: AdminPage, viewer: &User) -> Self {
        Self {
            navbar: NavbarView::from(viewer),
            total_revenue_label: format::currency(page.stats.total_revenue),
            stats: page.stats,
            summary: page.summary.into(),
            users: page
                .users
                .into_iter()
                .map(|u| AdminUserView::new(u, viewer))
                .collect(),
            plans: page.plans.into_iter().map(PlanView::from).collect(),
            event_types: page.event_types,
            events: page.events.into_iter().map(AdminEventView::from).collect(),
        }
    }
}

/// Request body for `POST /dashboard/admin/plans` and
/// `PUT /dashboard/admin/plans/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanRequest {
    /// Plan name.
    #[serde(default)]
    pub name: String,
    /// Event cap, `-1` for unlimited.
    #[serde(default)]
    pub max_events: Option<i32>,
    /// Monthly price.
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl From<PlanRequest> for PlanForm {
    fn from(req: PlanRequest) -> Self {
        Self {
            name: req.name,
            max_events: req.max_events,
            price: req.price,
        }
    }
}

/// Request body for `POST /dashboard/admin/event-types`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventTypeRequest {
    /// Category name.
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(role: Role, active: bool) -> User {
        User {
            id: UserId::new(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role,
            active,
            plan_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn inactive_user_offers_activation() {
        let admin = user(Role::Admin, true);
        let row = AdminUserView::new(user(Role::Participant, false), &admin);
        assert_eq!(row.active_label, "Inativo");
        assert_eq!(row.toggle_label, "Ativar");
        assert_eq!(row.role_label, "Participante");
        assert_eq!(row.badge_variant, BadgeVariant::Secondary);
        assert!(row.can_toggle);
    }

    #[test]
    fn own_row_cannot_be_toggled() {
        let admin = user(Role::Admin, true);
        let row = AdminUserView::new(admin.clone(), &admin);
        assert!(!row.can_toggle);
        assert_eq!(row.toggle_label, "Desativar");
        assert_eq!(row.badge_variant, BadgeVariant::Destructive);
    }

    #[test]
    fn summary_labels() {
        let view = SummaryCardsView::from(SummaryCards {
            active_users: 4,
            active_events: 2,
            active_rate_percent: 67,
            average_participants: 2,
            average_revenue: Decimal::new(30, 0),
        });
        assert_eq!(view.active_rate_label, "67%");
        assert_eq!(view.active_users, 4);
        assert_eq!(view.active_events, 2);
        assert_eq!(view.average_revenue_label, "R$ 30.00");
    }
}
