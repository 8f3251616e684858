//! Currency helpers
//!
//! Amounts are Colombian pesos held as `Decimal`. Presentation follows the
//! es-CO locale: `.` as thousands separator and no decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// VAT (IVA) rate applied to the discounted subtotal
pub const VAT_RATE: Decimal = dec!(0.19);

/// Round to the nearest whole currency unit, halves away from zero
#[inline]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// VAT owed on a subtotal, rounded to whole pesos
#[inline]
pub fn vat_for(subtotal: Decimal, rate: Decimal) -> Decimal {
    round_currency(subtotal * rate)
}

/// Format an amount as COP the way reservation views show it
///
/// `11900000` becomes `"$ 11.900.000"`.
pub fn format_cop(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-$ {}", grouped)
    } else {
        format!("$ {}", grouped)
    }
}

/// Format a discount rate as a percentage with one decimal (`0.035` -> `"3.5%"`)
pub fn format_rate(rate: Decimal) -> String {
    let pct = (rate * dec!(100)).round_dp(1);
    format!("{:.1}%", pct)
}
