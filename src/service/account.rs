//! Registration and login.
//!
//! There is no credential check: login finds the user by e-mail and the
//! password is required but never stored or compared.

use std::sync::Arc;

use crate::backend::{Backend, PlanOrder};
use crate::domain::{NewUser, Plan, PlanId, Role, User};
use crate::error::AppError;

use super::require;

/// Fields of the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Password; required, never persisted.
    pub password: String,
    /// Chosen role, as sent by the form.
    pub role: String,
    /// Chosen plan; only meaningful for organizers.
    pub plan_id: Option<PlanId>,
}

/// Login and registration pages.
#[derive(Debug, Clone)]
pub struct AccountService {
    backend: Arc<dyn Backend>,
}

impl AccountService {
    /// Creates the service.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Plans offered on the registration form, cheapest first.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn registration_plans(&self) -> Result<Vec<Plan>, AppError> {
        self.backend.list_plans(PlanOrder::PriceAscending).await
    }

    /// Creates an active account.
    ///
    /// The plan reference is kept for organizers only.
    ///
    /// # Errors
    ///
    /// [`AppError::MissingFields`] for a blank field,
    /// [`AppError::InvalidRequest`] for an unknown role,
    /// [`AppError::PlanRequired`] when an organizer picked no existing plan,
    /// [`AppError::Conflict`] when the e-mail is taken.
    pub async fn register(&self, form: Registration) -> Result<User, AppError> {
        require(&[
            ("nome", form.name.as_str()),
            ("e-mail", form.email.as_str()),
            ("senha", form.password.as_str()),
            ("perfil", form.role.as_str()),
        ])?;
        let role: Role = form
            .role
            .parse()
            .map_err(|e| AppError::InvalidRequest(format!("{e}")))?;

        let plan_id = match (role, form.plan_id) {
            (Role::Organizer, None) => return Err(AppError::PlanRequired),
            (Role::Organizer, Some(id)) => {
                if self.backend.get_plan(id).await?.is_none() {
                    return Err(AppError::PlanRequired);
                }
                Some(id)
            }
            _ => None,
        };

        let user = self
            .backend
            .insert_user(NewUser {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                role,
                plan_id,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "account created");
        Ok(user)
    }

    /// Resolves the account to log in as.
    ///
    /// # Errors
    ///
    /// [`AppError::MissingFields`] for a blank field,
    /// [`AppError::InvalidCredentials`] when no user has the e-mail.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        require(&[("e-mail", email), ("senha", password)])?;

        let user = self
            .backend
            .find_user_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}
