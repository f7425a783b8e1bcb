//! Login and registration DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{NavbarView, Toast};
use super::format;
use crate::domain::{Plan, PlanId, Role, User};

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account e-mail.
    #[serde(default)]
    pub email: String,
    /// Required, never checked.
    #[serde(default)]
    pub password: String,
}

/// Response body for a successful `POST /login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Welcome toast.
    pub toast: Toast,
    /// Dashboard of the user's role.
    pub redirect_to: &'static str,
    /// The session record now stored in the cookie.
    pub user: User,
}

/// Response body for `GET /login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPageView {
    /// Current session, if any.
    pub navbar: Option<NavbarView>,
}

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login e-mail.
    #[serde(default)]
    pub email: String,
    /// Required, never stored.
    #[serde(default)]
    pub password: String,
    /// `participant`, `organizer` or `admin`.
    #[serde(default)]
    pub role: String,
    /// Chosen plan; required for organizers.
    #[serde(default)]
    pub plan_id: Option<PlanId>,
}

/// Response body for a successful `POST /register` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Confirmation toast.
    pub toast: Toast,
    /// Where to go next (`/login`).
    pub redirect_to: &'static str,
}

/// A role choice on the registration form.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleOption {
    /// Submitted value.
    pub value: Role,
    /// Displayed label.
    pub label: &'static str,
}

/// A plan choice on the registration form.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanOption {
    /// Submitted value.
    pub id: PlanId,
    /// "{name} - {limit} - R$ {price}".
    pub label: String,
}

impl From<&Plan> for PlanOption {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            label: format!(
                "{} - {} - {}",
                plan.name,
                format::plan_limit(plan.max_events),
                format::currency(plan.price)
            ),
        }
    }
}

/// Response body for `GET /register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterPageView {
    /// Role choices in form order.
    pub roles: Vec<RoleOption>,
    /// Plans, cheapest first.
    pub plans: Vec<PlanOption>,
}

impl RegisterPageView {
    /// Builds the form from the plans on offer.
    #[must_use]
    pub fn new(plans: &[Plan]) -> Self {
        Self {
            roles: Role::ALL
                .iter()
                .map(|&role| RoleOption {
                    value: role,
                    label: role.label(),
                })
                .collect(),
            plans: plans.iter().map(PlanOption::from).collect(),
        }
    }
}
