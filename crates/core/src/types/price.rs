//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog API sends prices as JSON numbers (`109.95`). They are parsed
//! into [`Decimal`] so cart totals never pick up floating point drift.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for every monetary amount.
pub const DISPLAY_SCALE: u32 = 2;

/// A unit price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the `Decimal` range.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }

    /// Format for display with exactly two decimals (e.g., "19.90").
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format an amount with exactly two decimal places.
///
/// Rounds half away from zero, so `0.125` becomes `"0.13"` and `26` becomes
/// `"26.00"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_pads_integers() {
        assert_eq!(format_amount(Decimal::from(26)), "26.00");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(125, 3)), "0.13");
        assert_eq!(format_amount(Decimal::new(10_994, 3)), "10.99");
    }

    #[test]
    fn test_price_times_quantity() {
        let price = Price::from_cents(1050);
        assert_eq!(price.times(2), Decimal::from(21));
        assert_eq!(price.display(), "10.50");
    }

    #[test]
    fn test_price_times_saturates() {
        let price = Price::new(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0));
        assert_eq!(price.times(u32::MAX), Decimal::MAX);
    }

    #[test]
    fn test_price_parses_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap_or_default();
        assert_eq!(price, Price::from_cents(10_995));
        assert_eq!(price.to_string(), "109.95");
    }
}
