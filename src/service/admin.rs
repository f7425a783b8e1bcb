//! Admin dashboard: platform oversight.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{count_each, require};
use crate::backend::{Backend, PlanOrder};
use crate::domain::{
    CountedEvent, Event, EventFilter, EventId, EventType, Plan, PlanId, PlanInput,
    PlatformStats, SummaryCards, User, UserId,
};
use crate::error::AppError;

/// Everything the admin dashboard shows.
#[derive(Debug, Clone)]
pub struct AdminPage {
    /// Platform-wide counters.
    pub stats: PlatformStats,
    /// Every user, newest first.
    pub users: Vec<User>,
    /// Every plan, newest first.
    pub plans: Vec<Plan>,
    /// Event types by name.
    pub event_types: Vec<EventType>,
    /// Every event, newest first, with its participant count.
    pub events: Vec<CountedEvent>,
    /// Cards derived from `events`.
    pub summary: SummaryCards,
}

/// Fields of the plan form. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct PlanForm {
    /// Plan name.
    pub name: String,
    /// Event cap; `-1` for unlimited.
    pub max_events: Option<i32>,
    /// Monthly price.
    pub price: Option<Decimal>,
}

impl PlanForm {
    fn validate(self) -> Result<PlanInput, AppError> {
        require(&[("nome", self.name.as_str())])?;
        let (Some(max_events), Some(price)) = (self.max_events, self.price) else {
            return Err(AppError::MissingFields("máx. de eventos, preço".to_string()));
        };
        if max_events < Plan::UNLIMITED {
            return Err(AppError::InvalidRequest(
                "O limite de eventos deve ser -1 (ilimitado) ou maior.".to_string(),
            ));
        }
        if price.is_sign_negative() {
            return Err(AppError::InvalidRequest(
                "O preço não pode ser negativo.".to_string(),
            ));
        }
        Ok(PlanInput {
            name: self.name.trim().to_string(),
            max_events,
            price,
        })
    }
}

/// Admin dashboard page component.
#[derive(Debug, Clone)]
pub struct AdminService {
    backend: Arc<dyn Backend>,
}

impl AdminService {
    /// Creates the service.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Fetches the dashboard.
    ///
    /// Participant counts are fetched with one count query per event.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn dashboard(&self) -> Result<AdminPage, AppError> {
        let stats = self.backend.platform_stats().await?;
        let users = self.backend.list_users().await?;
        let plans = self.backend.list_plans(PlanOrder::NewestFirst).await?;
        let event_types = self.backend.list_event_types().await?;
        let listings = self.backend.list_events(EventFilter::default()).await?;
        let events = count_each(self.backend.as_ref(), listings).await?;
        let summary = SummaryCards::compute(&users, &events, stats.total_revenue);

        Ok(AdminPage {
            stats,
            users,
            plans,
            event_types,
            events,
            summary,
        })
    }

    /// Flips a user's `active` flag.
    ///
    /// # Errors
    ///
    /// [`AppError::Conflict`] when `target` is the admin's own account,
    /// [`AppError::NotFound`] for an unknown user.
    pub async fn toggle_user_active(&self, admin: &User, target: UserId) -> Result<User, AppError> {
        if admin.id == target {
            return Err(AppError::Conflict(
                "Você não pode alterar o status da sua própria conta.".to_string(),
            ));
        }
        let user = self
            .backend
            .get_user(target)
            .await?
            .ok_or_else(|| AppError::not_found("Usuário", target))?;

        let updated = self.backend.set_user_active(target, !user.active).await?;
        tracing::info!(user_id = %target, active = updated.active, "user status changed");
        Ok(updated)
    }

    /// Flips any event between active and inactive.
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
        tracing::info!(event_id = %id, status = %updated.status, "event status changed by admin");
        Ok(updated)
    }

    /// Deletes any event together with its tickets.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] for an unknown event.
    pub async fn delete_event(&self, id: EventId) -> Result<(), AppError> {
        self.backend.delete_event(id).await?;
        tracing::info!(event_id = %id, "event deleted by admin");
        Ok(())
    }

    /// Creates a plan.
    ///
    /// # Errors
    ///
    /// [`AppError::MissingFields`] or [`AppError::InvalidRequest`] for a bad
    /// form.
    pub async fn create_plan(&self, form: PlanForm) -> Result<Plan, AppError> {
        let plan = self.backend.insert_plan(form.validate()?).await?;
        tracing::info!(plan_id = %plan.id, "plan created");
        Ok(plan)
    }

    /// Overwrites a plan.
    ///
    /// # Errors
    ///
    /// Form errors as for [`AdminService::create_plan`], or
    /// [`AppError::NotFound`] for an unknown plan.
    pub async fn update_plan(&self, id: PlanId, form: PlanForm) -> Result<Plan, AppError> {
        let plan = self.backend.update_plan(id, form.validate()?).await?;
        tracing::info!(plan_id = %id, "plan updated");
        Ok(plan)
    }

    /// Deletes a plan. Whether a referenced plan may go is up to the backend.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] or the backend's [`AppError::Conflict`].
    pub async fn delete_plan(&self, id: PlanId) -> Result<(), AppError> {
        self.backend.delete_plan(id).await?;
        tracing::info!(plan_id = %id, "plan deleted");
        Ok(())
    }

    /// Adds an event category.
    ///
    /// # Errors
    ///
    /// [`AppError::MissingFields`] for a blank name, [`AppError::Conflict`]
    /// for a duplicate.
    pub async fn create_event_type(&self, name: &str) -> Result<EventType, AppError> {
        require(&[("nome", name)])?;
        let event_type = self.backend.insert_event_type(name.trim()).await?;
        tracing::info!(event_type_id = %event_type.id, "event type created");
        Ok(event_type)
    }
}
