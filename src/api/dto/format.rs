//! Display formatting shared by the view models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::Plan;

/// `R$ 12.50`: two fraction digits, dot separator.
#[must_use]
pub fn currency(value: Decimal) -> String {
    format!("R$ {value:.2}")
}

/// `dd/mm/yyyy`.
#[must_use]
pub fn date(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy HH:MM`.
#[must_use]
pub fn date_time(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// "Ilimitado" or "N eventos".
#[must_use]
pub fn plan_limit(max_events: i32) -> String {
    if max_events == Plan::UNLIMITED {
        "Ilimitado".to_string()
    } else {
        format!("{max_events} eventos")
    }
}

/// "Ativo" / "Inativo".
#[must_use]
pub const fn active_label(active: bool) -> &'static str {
    if active { "Ativo" } else { "Inativo" }
}

/// Label of the button that flips `active`.
#[must_use]
pub const fn toggle_label(active: bool) -> &'static str {
    if active { "Desativar" } else { "Ativar" }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(currency(Decimal::new(125, 1)), "R$ 12.50");
        assert_eq!(currency(Decimal::ZERO), "R$ 0.00");
        assert_eq!(currency(Decimal::new(33_333, 3)), "R$ 33.33");
    }

    #[test]
    fn dates_are_day_first() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).single();
        assert_eq!(ts.map(date).as_deref(), Some("07/03/2025"));
        assert_eq!(ts.map(date_time).as_deref(), Some("07/03/2025 09:05"));
    }

    #[test]
    fn plan_limits() {
        assert_eq!(plan_limit(Plan::UNLIMITED), "Ilimitado");
        assert_eq!(plan_limit(5), "5 eventos");
    }

    #[test]
    fn toggle_reads_opposite_of_state() {
        assert_eq!(active_label(true), "Ativo");
        assert_eq!(toggle_label(true), "Desativar");
        assert_eq!(active_label(false), "Inativo");
        assert_eq!(toggle_label(false), "Ativar");
    }
}
