//! Quote DTOs
//!
//! Request and response types for the reservation quote endpoint.

use chrono::NaiveDate;
use prisma_core::models::rate::SpotLength;
use prisma_core::models::reservation::MAX_RESERVATION_WEEKS;
use prisma_core::models::{Periodo, PricingSummary, ReservationWindow, ScreenSelection, Tarifa};
use prisma_core::money::{format_cop, format_rate};
use prisma_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Quote request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Screens picked for the reservation
    #[validate(length(min = 1, message = "At least one screen is required"))]
    pub pantallas: Vec<ScreenSelection>,

    /// Duration, in `periodo` units
    #[validate(range(min = 1, max = 52, message = "Duration must be between 1 and 52"))]
    pub duracion: i64,

    /// Unit of `duracion` (default: weeks)
    #[serde(default)]
    pub periodo: Periodo,

    /// First day on air; without it no week is priced as December
    #[serde(default)]
    pub fecha_inicio: Option<NaiveDate>,

    /// Rate rows overriding the configured ones
    #[serde(default)]
    pub tarifas: Option<Vec<Tarifa>>,
}

impl QuoteRequest {
    /// Duration in weeks, checked against the bookable range
    pub fn weeks(&self) -> AppResult<i64> {
        let weeks = self.periodo.to_weeks(self.duracion);
        if (1..=MAX_RESERVATION_WEEKS).contains(&weeks) {
            Ok(weeks)
        } else {
            Err(AppError::UnsupportedDuration(weeks))
        }
    }

    /// Reject spot lengths other than 20, 40 or 60 seconds
    pub fn check_spot_lengths(&self) -> AppResult<()> {
        for screen in &self.pantallas {
            if let Some(seconds) = screen.segundos {
                if SpotLength::from_seconds(seconds).is_none() {
                    return Err(AppError::InvalidInput(format!(
                        "Unsupported spot length: {} seconds",
                        seconds
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Amounts formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedAmounts {
    /// Subtotal before discount
    #[serde(rename = "baseTotal")]
    pub base_total: String,
    /// Subtotal after discount
    #[serde(rename = "totalConDescuento")]
    pub discounted_total: String,
    /// VAT
    pub iva: String,
    /// Amount due
    pub total: String,
    /// Savings
    pub ahorro: String,
    /// Discount rate as a percentage
    pub descuento: String,
}

impl From<&PricingSummary> for FormattedAmounts {
    fn from(summary: &PricingSummary) -> Self {
        Self {
            base_total: format_cop(summary.base_total),
            discounted_total: format_cop(summary.discounted_total),
            iva: format_cop(summary.vat),
            total: format_cop(summary.total),
            ahorro: format_cop(summary.savings),
            descuento: format_rate(summary.discount),
        }
    }
}

/// Quote response
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    /// Pricing breakdown
    #[serde(flatten)]
    pub summary: PricingSummary,

    /// Duration in weeks
    pub semanas: i64,

    /// Last day on air, when a start date was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,

    /// Display strings for the amounts
    pub formato: FormattedAmounts,
}

impl QuoteResponse {
    /// Build the response for a summary priced over `weeks` weeks
    pub fn new(summary: PricingSummary, weeks: i64, fecha_inicio: Option<NaiveDate>) -> Self {
        let fecha_fin = fecha_inicio.map(|d| ReservationWindow::new(d, weeks).fecha_fin());
        let formato = FormattedAmounts::from(&summary);
        Self {
            summary,
            semanas: weeks,
            fecha_fin,
            formato,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> QuoteRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_weeks_from_months() {
        let req = request(r#"{"pantallas": [{"segundos": 20}], "duracion": 3, "periodo": "meses"}"#);
        assert!(req.validate().is_ok());
        assert_eq!(req.weeks().unwrap(), 12);

        let req = request(r#"{"pantallas": [{"segundos": 20}], "duracion": 14, "periodo": "mes"}"#);
        assert!(matches!(req.weeks(), Err(AppError::UnsupportedDuration(56))));
    }

    #[test]
    fn test_validation() {
        let req = request(r#"{"pantallas": [], "duracion": 4}"#);
        assert!(req.validate().is_err());

        let req = request(r#"{"pantallas": [{"segundos": 20}], "duracion": 0}"#);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_spot_lengths() {
        let req = request(r#"{"pantallas": [{"segundos": 40}, {"id_pantalla": "3"}], "duracion": 4}"#);
        assert!(req.check_spot_lengths().is_ok());

        let req = request(r#"{"pantallas": [{"segundos": 30}], "duracion": 4}"#);
        assert!(matches!(req.check_spot_lengths(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_response_end_date() {
        let summary = PricingSummary::empty(rust_decimal::Decimal::ZERO, 0, 2);
        let start = NaiveDate::from_ymd_opt(2025, 3, 3);
        let resp = QuoteResponse::new(summary, 2, start);
        assert_eq!(resp.fecha_fin, NaiveDate::from_ymd_opt(2025, 3, 17));
        assert_eq!(resp.formato.total, "$ 0");
        assert_eq!(resp.formato.descuento, "0.0%");
    }
}
