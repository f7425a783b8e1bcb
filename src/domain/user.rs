//! Users and the plans organizers subscribe to.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PlanId, Role, UserId};

/// A row of the `users` table.
///
/// This is also the record kept in the session: it is serialized as-is and
/// trusted by every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login e-mail, unique across users.
    pub email: String,
    /// Role fixed at registration.
    pub role: Role,
    /// Whether an admin has left the account enabled.
    pub active: bool,
    /// Subscribed plan; only organizers carry one.
    #[serde(default)]
    pub plan_id: Option<PlanId>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when inserting a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Role chosen on the registration form.
    pub role: Role,
    /// Plan reference (organizers only).
    pub plan_id: Option<PlanId>,
}

/// A row of the `plans` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plan {
    /// Primary key.
    pub id: PlanId,
    /// Plan name.
    pub name: String,
    /// Maximum number of events an organizer on this plan may create;
    /// [`Plan::UNLIMITED`] lifts the limit.
    pub max_events: i32,
    /// Monthly price.
    pub price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Plan {
    /// `max_events` value meaning "no limit".
    pub const UNLIMITED: i32 = -1;

    /// Returns `true` if the plan places no cap on events.
    #[must_use]
    pub const fn is_unlimited(&self) -> bool {
        self.max_events == Self::UNLIMITED
    }

    /// Returns `true` if an organizer who already owns `existing` events may
    /// create one more.
    #[must_use]
    pub fn allows_another(&self, existing: i64) -> bool {
        self.is_unlimited() || existing < i64::from(self.max_events)
    }
}

/// Fields of a plan as entered on the admin plan form.
#[derive(Debug, Clone)]
pub struct PlanInput {
    /// Plan name.
    pub name: String,
    /// Event cap (`-1` = unlimited).
    pub max_events: i32,
    /// Price.
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(max_events: i32) -> Plan {
        Plan {
            id: PlanId::new(),
            name: "Básico".to_string(),
            max_events,
            price: Decimal::new(2990, 2),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn limited_plan_caps_event_count() {
        let p = plan(2);
        assert!(p.allows_another(0));
        assert!(p.allows_another(1));
        assert!(!p.allows_another(2));
    }

    #[test]
    fn unlimited_plan_never_caps() {
        let p = plan(Plan::UNLIMITED);
        assert!(p.is_unlimited());
        assert!(p.allows_another(10_000));
    }

    #[test]
    fn zero_event_plan_allows_nothing() {
        assert!(!plan(0).allows_another(0));
    }

    #[test]
    fn user_record_tolerates_missing_plan() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "name": "Ana",
            "email": "ana@example.com",
            "role": "participant",
            "active": true,
            "created_at": "2025-01-01T10:00:00Z"
        });
        let user: Result<User, _> = serde_json::from_value(json);
        assert!(user.is_ok_and(|u| u.plan_id.is_none()));
    }
}
