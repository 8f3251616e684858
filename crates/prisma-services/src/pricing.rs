//! Reservation pricing
//!
//! Prices a multi-screen, multi-week reservation:
//!
//! - ordinary weeks are billed at the screen's weekly rate and take the
//!   duration discount (3.5 % above 13 weeks, 10 % above 26 weeks);
//! - December weeks are billed at a flat per-slot rate and are never discounted;
//! - VAT is charged on the discounted subtotal and rounded to whole pesos.
//!
//! Pricing is total: incomplete screens, a missing start date or a
//! non-positive duration contribute zero instead of failing.

use chrono::NaiveDate;
use prisma_core::models::{
    DecemberSplit, PricingPolicy, PricingSummary, RateTable, ScreenQuote, ScreenSelection,
};
use prisma_core::money::{round_currency, vat_for};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::calendar::december_split;

/// Stateless calculator bound to a read-only pricing policy
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    policy: PricingPolicy,
}

impl PricingCalculator {
    /// Create a calculator for the given policy
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// Policy this calculator applies
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Price one screen for an already computed December split
    ///
    /// Returns `None` when the screen has no spot duration, no positive
    /// weekly rate, or amounts too large to represent.
    pub fn quote_screen(
        &self,
        screen: &ScreenSelection,
        rates: &RateTable,
        discount: Decimal,
        split: DecemberSplit,
    ) -> Option<ScreenQuote> {
        let seconds = screen.segundos.filter(|s| *s > 0)?;
        let weekly_rate = screen.weekly_rate(rates);
        if weekly_rate <= Decimal::ZERO {
            return None;
        }

        let quote = self.price_line(screen, seconds, weekly_rate, discount, split);
        if quote.is_none() {
            debug!(seconds, %weekly_rate, "Screen amounts overflow");
        }
        quote
    }

    fn price_line(
        &self,
        screen: &ScreenSelection,
        seconds: u32,
        weekly_rate: Decimal,
        discount: Decimal,
        split: DecemberSplit,
    ) -> Option<ScreenQuote> {
        let slots = screen.slots();
        let december_weekly_rate = self.policy.december_weekly_rate(slots)?;

        let regular_total = weekly_rate.checked_mul(Decimal::from(split.regular_weeks))?;
        let december_total =
            december_weekly_rate.checked_mul(Decimal::from(split.december_weeks))?;
        let regular_discounted = regular_total.checked_mul(Decimal::ONE - discount)?;

        Some(ScreenQuote {
            screen_id: screen.id_pantalla.clone(),
            seconds,
            slots,
            weekly_rate,
            december_weekly_rate,
            base_total: regular_total.checked_add(december_total)?,
            discounted_total: regular_discounted.checked_add(december_total)?,
            savings: regular_total - regular_discounted,
            discount,
        })
    }

    /// Running totals with `quote` added, or `None` if they, or the total
    /// with VAT, would no longer be representable
    fn accumulate(
        &self,
        summary: &PricingSummary,
        quote: &ScreenQuote,
    ) -> Option<(Decimal, Decimal, Decimal)> {
        let base_total = summary.base_total.checked_add(quote.base_total)?;
        let discounted_total = summary.discounted_total.checked_add(quote.discounted_total)?;
        let savings = summary.savings.checked_add(quote.savings)?;

        let vat = discounted_total
            .checked_mul(self.policy.vat_rate)
            .map(round_currency)?;
        discounted_total.checked_add(vat)?;

        Some((base_total, discounted_total, savings))
    }

    /// Price a whole reservation
    ///
    /// `weeks` is the total duration; `None`, zero or negative durations price
    /// nothing. The discount rate is reported even when nothing is priced.
    #[instrument(skip(self, screens, rates), fields(screen_count = screens.len()))]
    pub fn summarize(
        &self,
        screens: &[ScreenSelection],
        weeks: Option<i64>,
        rates: &RateTable,
        fecha_inicio: Option<NaiveDate>,
    ) -> PricingSummary {
        let weeks = weeks.unwrap_or(0);
        let split = december_split(fecha_inicio, weeks);
        let discount = self.policy.discount_for(weeks);

        let mut summary = PricingSummary::empty(discount, split.december_weeks, split.regular_weeks);

        if weeks <= 0 || fecha_inicio.is_none() {
            debug!(weeks, has_start = fecha_inicio.is_some(), "Nothing to price");
            return summary;
        }

        for (index, screen) in screens.iter().enumerate() {
            let Some(quote) = self.quote_screen(screen, rates, discount, split) else {
                debug!(index, segundos = ?screen.segundos, "Skipping unpriced screen");
                continue;
            };
            match self.accumulate(&summary, &quote) {
                Some((base_total, discounted_total, savings)) => {
                    summary.base_total = base_total;
                    summary.discounted_total = discounted_total;
                    summary.savings = savings;
                    summary.lines.push(quote);
                }
                None => debug!(index, "Dropping screen, reservation total overflows"),
            }
        }

        summary.vat = vat_for(summary.discounted_total, self.policy.vat_rate);
        summary.total = summary.discounted_total + summary.vat;

        debug!(
            base_total = %summary.base_total,
            discounted_total = %summary.discounted_total,
            total = %summary.total,
            december_weeks = split.december_weeks,
            "Reservation priced"
        );

        summary
    }
}

/// Price a reservation with the standard policy
pub fn compute_summary(
    screens: &[ScreenSelection],
    weeks: Option<i64>,
    rates: &RateTable,
    fecha_inicio: Option<NaiveDate>,
) -> PricingSummary {
    PricingCalculator::default().summarize(screens, weeks, rates, fecha_inicio)
}
