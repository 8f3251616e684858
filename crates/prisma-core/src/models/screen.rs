//! Screen selection model
//!
//! One screen picked for a reservation, as the reservation views send it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rate::{slots_for_seconds, RateTable};

/// A screen chosen for a reservation
///
/// Only `segundos` and the weekly rate matter for pricing; the remaining
/// fields identify the screen and travel through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSelection {
    /// Screen identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_pantalla: Option<String>,

    /// Cylinder hosting the screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cilindro: Option<i64>,

    /// Human-readable screen label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identificador: Option<String>,

    /// Rate code picked for the screen
    #[serde(default, alias = "cod_tarifas", skip_serializing_if = "Option::is_none")]
    pub codigo_tarifa: Option<String>,

    /// Spot duration in seconds (20, 40 or 60)
    #[serde(default)]
    pub segundos: Option<u32>,

    /// Weekly rate used when the rate table has no entry for `segundos`
    #[serde(default)]
    pub base: Option<Decimal>,
}

impl ScreenSelection {
    /// Selection with just a spot duration
    pub fn with_seconds(segundos: u32) -> Self {
        Self {
            segundos: Some(segundos),
            ..Default::default()
        }
    }

    /// Billing slots for this selection (0 when `segundos` is missing)
    pub fn slots(&self) -> u32 {
        self.segundos.map_or(0, slots_for_seconds)
    }

    /// Ordinary weekly rate: table entry, then `base`, then zero
    pub fn weekly_rate(&self, rates: &RateTable) -> Decimal {
        self.segundos
            .and_then(|s| rates.weekly_rate(s))
            .or(self.base)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tarifa;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weekly_rate_fallbacks() {
        let rates = RateTable::new().with_rate(20, dec!(1000000));

        let table_hit = ScreenSelection {
            segundos: Some(20),
            base: Some(dec!(5)),
            ..Default::default()
        };
        assert_eq!(table_hit.weekly_rate(&rates), dec!(1000000));

        let base_fallback = ScreenSelection {
            segundos: Some(40),
            base: Some(dec!(1700000)),
            ..Default::default()
        };
        assert_eq!(base_fallback.weekly_rate(&rates), dec!(1700000));

        let nothing = ScreenSelection::with_seconds(60);
        assert_eq!(nothing.weekly_rate(&rates), Decimal::ZERO);
    }

    #[test]
    fn test_zero_price_row_falls_back_to_base() {
        let rates = RateTable::from_tarifas(&[Tarifa {
            codigo_tarifa: "PROMO".to_string(),
            duracion_seg: 20,
            precio_semana: Decimal::ZERO,
        }]);
        let screen = ScreenSelection {
            segundos: Some(20),
            base: Some(dec!(1200000)),
            ..Default::default()
        };
        assert_eq!(screen.weekly_rate(&rates), dec!(1200000));
    }

    #[test]
    fn test_slots() {
        assert_eq!(ScreenSelection::default().slots(), 0);
        assert_eq!(ScreenSelection::with_seconds(40).slots(), 2);
    }

    #[test]
    fn test_deserialize_frontend_payload() {
        let screen: ScreenSelection = serde_json::from_str(
            r#"{"id_pantalla": "P-12", "cilindro": 3, "cod_tarifas": "T40", "segundos": 40}"#,
        )
        .unwrap();
        assert_eq!(screen.codigo_tarifa.as_deref(), Some("T40"));
        assert_eq!(screen.segundos, Some(40));
        assert!(screen.base.is_none());
    }
}
