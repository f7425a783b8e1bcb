//! Shared DTO types used across multiple pages.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{BadgeVariant, Role, User};

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    /// Neutral confirmation.
    Default,
    /// Failure.
    Destructive,
}

/// Transient notification shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Toast {
    /// Visual style.
    pub variant: ToastVariant,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl Toast {
    /// Confirmation toast.
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Default,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Failure toast.
    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Response of every dashboard mutation: the toast plus the refetched page.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse<T> {
    /// Confirmation to display.
    pub toast: Toast,
    /// Page state after the mutation.
    pub page: T,
}

impl<T> MutationResponse<T> {
    /// Pairs a toast with a page.
    #[must_use]
    pub const fn new(toast: Toast, page: T) -> Self {
        Self { toast, page }
    }
}

/// Navigation bar shown while logged in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavbarView {
    /// Logged-in user's name.
    pub user_name: String,
    /// Logged-in user's role.
    pub role: Role,
    /// Role label ("Organizador", ...).
    pub role_label: &'static str,
    /// Badge next to the role.
    pub badge_variant: BadgeVariant,
    /// Link to the user's dashboard.
    pub dashboard_path: &'static str,
}

impl From<&User> for NavbarView {
    fn from(user: &User) -> Self {
        Self {
            user_name: user.name.clone(),
            role: user.role,
            role_label: user.role.label(),
            badge_variant: user.role.badge_variant(),
            dashboard_path: user.role.dashboard_path(),
        }
    }
}

/// Body of the catch-all 404 page.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundView {
    /// Requested path.
    pub path: String,
    /// Message shown to the user.
    pub message: &'static str,
    /// Link back home.
    pub home_path: &'static str,
}
