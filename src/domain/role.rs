//! User roles and their fixed presentation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role of a user, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Oversees users, plans, event types and every event.
    Admin,
    /// Publishes and manages their own events.
    Organizer,
    /// Browses active events and registers for them.
    Participant,
}

/// Visual badge variant used next to a role or status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    /// Red badge.
    Destructive,
    /// Primary-colour badge.
    Default,
    /// Muted badge.
    Secondary,
    /// Outlined badge.
    Outline,
}

impl Role {
    /// All roles, in registration-form order.
    pub const ALL: [Self; 3] = [Self::Participant, Self::Organizer, Self::Admin];

    /// Wire/database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Organizer => "organizer",
            Self::Participant => "participant",
        }
    }

    /// Human-readable label shown in the navbar and user lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Organizer => "Organizador",
            Self::Participant => "Participante",
        }
    }

    /// Badge variant for the admin user list.
    #[must_use]
    pub const fn badge_variant(self) -> BadgeVariant {
        match self {
            Self::Admin => BadgeVariant::Destructive,
            Self::Organizer => BadgeVariant::Default,
            Self::Participant => BadgeVariant::Secondary,
        }
    }

    /// Dashboard a user of this role lands on after logging in.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin",
            Self::Organizer => "/dashboard/organizer",
            Self::Participant => "/dashboard/participant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "organizer" => Ok(Self::Organizer),
            "participant" => Ok(Self::Participant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_role() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn labels_and_badges() {
        assert_eq!(Role::Admin.label(), "Administrador");
        assert_eq!(Role::Organizer.label(), "Organizador");
        assert_eq!(Role::Participant.label(), "Participante");
        assert_eq!(Role::Admin.badge_variant(), BadgeVariant::Destructive);
        assert_eq!(Role::Participant.badge_variant(), BadgeVariant::Secondary);
    }

    #[test]
    fn each_role_has_its_own_dashboard() {
        assert_eq!(Role::Admin.dashboard_path(), "/dashboard/admin");
        assert_eq!(Role::Organizer.dashboard_path(), "/dashboard/organizer");
        assert_eq!(Role::Participant.dashboard_path(), "/dashboard/participant");
    }
}
