//! Pricing policy and quote results
//!
//! `PricingPolicy` carries the business constants the calculator reads.
//! `ScreenQuote` and `PricingSummary` are derived values recomputed on every
//! call; they have no lifecycle of their own.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::money::VAT_RATE;
use crate::AppResult;

/// Flat weekly price per slot for December weeks
pub const DECEMBER_RATE_PER_SLOT: Decimal = dec!(2000000);

/// Duration-based discount step
///
/// Applies when the reservation lasts strictly more than `more_than_weeks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Exclusive lower bound on the duration in weeks
    pub more_than_weeks: i64,

    /// Fraction taken off the ordinary-week subtotal
    pub rate: Decimal,
}

impl DiscountTier {
    /// Create a tier
    pub const fn new(more_than_weeks: i64, rate: Decimal) -> Self {
        Self {
            more_than_weeks,
            rate,
        }
    }
}

/// Read-only business rules handed to the pricing calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Weekly December price for one slot
    pub december_rate_per_slot: Decimal,

    /// VAT rate on the discounted subtotal
    pub vat_rate: Decimal,

    /// Discount tiers, in any order
    pub tiers: Vec<DiscountTier>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            december_rate_per_slot: DECEMBER_RATE_PER_SLOT,
            vat_rate: VAT_RATE,
            tiers: vec![
                DiscountTier::new(26, dec!(0.10)),
                DiscountTier::new(13, dec!(0.035)),
            ],
        }
    }
}

impl PricingPolicy {
    /// Discount rate for a reservation of `weeks` weeks
    ///
    /// The tier with the highest threshold below `weeks` wins.
    pub fn discount_for(&self, weeks: i64) -> Decimal {
        self.tiers
            .iter()
            .filter(|t| weeks > t.more_than_weeks)
            .max_by_key(|t| t.more_than_weeks)
            .map_or(Decimal::ZERO, |t| t.rate)
    }

    /// Weekly December price for a spot occupying `slots` slots
    ///
    /// `None` when the price is not representable.
    #[inline]
    pub fn december_weekly_rate(&self, slots: u32) -> Option<Decimal> {
        self.december_rate_per_slot.checked_mul(Decimal::from(slots))
    }

    /// Reject rates outside `[0, 1]` and negative prices
    pub fn validate(&self) -> AppResult<()> {
        if self.december_rate_per_slot < Decimal::ZERO {
            return Err(AppError::Config(
                "december_rate_per_slot must not be negative".to_string(),
            ));
        }
        if self.vat_rate < Decimal::ZERO || self.vat_rate > Decimal::ONE {
            return Err(AppError::Config(format!(
                "vat_rate {} is outside [0, 1]",
                self.vat_rate
            )));
        }
        if let Some(t) = self
            .tiers
            .iter()
            .find(|t| t.rate < Decimal::ZERO || t.rate > Decimal::ONE)
        {
            return Err(AppError::Config(format!(
                "discount rate {} for more than {} weeks is outside [0, 1]",
                t.rate, t.more_than_weeks
            )));
        }
        Ok(())
    }
}

/// Price breakdown for one screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenQuote {
    /// Screen identifier, when the selection carried one
    #[serde(rename = "id_pantalla", skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,

    /// Spot duration in seconds
    #[serde(rename = "segundos")]
    pub seconds: u32,

    /// Billing slots
    #[serde(rename = "cupos")]
    pub slots: u32,

    /// Ordinary weekly rate
    #[serde(rename = "tarifaSemana")]
    pub weekly_rate: Decimal,

    /// December weekly rate
    #[serde(rename = "tarifaDicSemana")]
    pub december_weekly_rate: Decimal,

    /// Subtotal before discount (December pricing applied)
    #[serde(rename = "baseTotal")]
    pub base_total: Decimal,

    /// Subtotal after discount
    #[serde(rename = "totalConDescuento")]
    pub discounted_total: Decimal,

    /// Discount amount
    #[serde(rename = "ahorro")]
    pub savings: Decimal,

    /// Discount rate applied to ordinary weeks
    #[serde(rename = "descuento")]
    pub discount: Decimal,
}

/// Aggregate pricing for a reservation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSummary {
    /// Sum of per-screen subtotals before discount
    #[serde(rename = "baseTotal")]
    pub base_total: Decimal,

    /// Sum of per-screen subtotals after discount
    #[serde(rename = "totalConDescuento")]
    pub discounted_total: Decimal,

    /// VAT on the discounted subtotal, rounded to whole pesos
    #[serde(rename = "iva")]
    pub vat: Decimal,

    /// Discounted subtotal plus VAT
    pub total: Decimal,

    /// Sum of per-screen savings
    #[serde(rename = "ahorro")]
    pub savings: Decimal,

    /// Discount rate applied to ordinary weeks
    #[serde(rename = "descuento")]
    pub discount: Decimal,

    /// Weeks lying entirely in December
    #[serde(rename = "semanasDic")]
    pub december_weeks: u32,

    /// Remaining weeks
    #[serde(rename = "semanasFueraDic")]
    pub regular_weeks: u32,

    /// Per-screen breakdown, one entry per priced screen
    #[serde(rename = "pantallas")]
    pub lines: Vec<ScreenQuote>,
}

impl PricingSummary {
    /// Summary of a reservation with nothing to price
    pub fn empty(discount: Decimal, december_weeks: u32, regular_weeks: u32) -> Self {
        Self {
            base_total: Decimal::ZERO,
            discounted_total: Decimal::ZERO,
            vat: Decimal::ZERO,
            total: Decimal::ZERO,
            savings: Decimal::ZERO,
            discount,
            december_weeks,
            regular_weeks,
            lines: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.discount_for(1), Decimal::ZERO);
        assert_eq!(policy.discount_for(13), Decimal::ZERO);
        assert_eq!(policy.discount_for(14), dec!(0.035));
        assert_eq!(policy.discount_for(26), dec!(0.035));
        assert_eq!(policy.discount_for(27), dec!(0.10));
        assert_eq!(policy.discount_for(52), dec!(0.10));
        assert_eq!(policy.discount_for(-3), Decimal::ZERO);
    }

    #[test]
    fn test_tier_order_does_not_matter() {
        let policy = PricingPolicy {
            tiers: vec![
                DiscountTier::new(13, dec!(0.035)),
                DiscountTier::new(26, dec!(0.10)),
            ],
            ..Default::default()
        };
        assert_eq!(policy.discount_for(30), dec!(0.10));
    }

    #[test]
    fn test_december_weekly_rate() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.december_weekly_rate(1), Some(dec!(2000000)));
        assert_eq!(policy.december_weekly_rate(3), Some(dec!(6000000)));

        let policy = PricingPolicy {
            december_rate_per_slot: Decimal::MAX,
            ..Default::default()
        };
        assert_eq!(policy.december_weekly_rate(2), None);
    }

    #[test]
    fn test_validate() {
        assert!(PricingPolicy::default().validate().is_ok());

        let policy = PricingPolicy {
            tiers: vec![DiscountTier::new(13, dec!(1.5))],
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(AppError::Config(_))));

        let policy = PricingPolicy {
            vat_rate: dec!(-0.19),
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }
}
