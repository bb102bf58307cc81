//! # Money
//!
//! Integer money in kopecks. Prices and order totals never touch floating
//! point: `450.00 ₽` is stored as `45000`.

use serde::{Deserialize, Serialize};

/// An amount of money in kopecks (smallest currency unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates money from kopecks.
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates money from whole rubles.
    #[inline]
    pub const fn from_rubles(rubles: i64) -> Self {
        Money(rubles * 100)
    }

    /// Returns the amount in kopecks.
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturating addition; order totals never wrap.
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Multiplies by a quantity (line total = unit price × quantity).
    #[inline]
    pub const fn times(self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }
}

impl std::fmt::Display for Money {
    /// Renders as `рубли.копейки`, e.g. `450.00`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_kopecks() {
        assert_eq!(Money::from_kopecks(45000).to_string(), "450.00");
        assert_eq!(Money::from_kopecks(38005).to_string(), "380.05");
        assert_eq!(Money::from_kopecks(-150).to_string(), "-1.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn line_total_is_unit_price_times_quantity() {
        let unit = Money::from_rubles(520);
        assert_eq!(unit.times(2).kopecks(), 104_000);
    }

    #[test]
    fn sum_of_line_totals() {
        let total: Money = [Money::from_rubles(450), Money::from_rubles(380)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rubles(830));
    }
}
