//! Pre-aggregated statistics returned by the backend's statistics calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CountedEvent, User};

/// Platform-wide figures for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlatformStats {
    /// Every registered user.
    pub total_users: i64,
    /// Users with the organizer role.
    pub total_organizers: i64,
    /// Users with the participant role.
    pub total_participants: i64,
    /// Every event, whatever its status.
    pub total_events: i64,
    /// Events currently active.
    pub active_events: i64,
    /// Tickets issued.
    pub total_registrations: i64,
    /// Sum of the event price over every ticket.
    pub total_revenue: Decimal,
}

/// Figures for a single organizer's dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizerStats {
    /// Events owned by the organizer.
    pub total_events: i64,
    /// Owned events currently active.
    pub active_events: i64,
    /// Tickets issued for owned events.
    pub total_participants: i64,
    /// Sum of the event price over those tickets.
    pub total_revenue: Decimal,
}

/// Derived cards shown under the admin event list.
///
/// Computed from the listed events, not from [`PlatformStats`] counters,
/// except for revenue which only the statistics call provides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCards {
    /// Listed users whose account is enabled.
    pub active_users: i64,
    /// Listed events currently active.
    pub active_events: i64,
    /// Share of active events, as a rounded percentage.
    pub active_rate_percent: i64,
    /// Mean participants per event, rounded.
    pub average_participants: i64,
    /// Total revenue divided by the number of events.
    pub average_revenue: Decimal,
}

impl SummaryCards {
    /// Computes the cards from the listed users and events. Rate and
    /// averages are zero when there are no events.
    #[must_use]
    pub fn compute(users: &[User], events: &[CountedEvent], total_revenue: Decimal) -> Self {
        let active_users = count(users.iter().filter(|u| u.active).count());
        let active_events = count(
            events
                .iter()
                .filter(|e| e.event.status.is_active())
                .count(),
        );
        let total = count(events.len());
        if total == 0 {
            return Self {
                active_users,
                active_events,
                ..Self::default()
            };
        }
        let participants: i64 = events.iter().map(|e| e.participant_count).sum();

        Self {
            active_users,
            active_events,
            active_rate_percent: rounded_ratio(active_events.saturating_mul(100), total),
            average_participants: rounded_ratio(participants, total),
            average_revenue: total_revenue / Decimal::from(total),
        }
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// `num / den` rounded half up, for non-negative operands and `den > 0`.
fn rounded_ratio(num: i64, den: i64) -> i64 {
    (num.saturating_mul(2) + den) / den.saturating_mul(2)
}
