//! Cart pricing calculator.
//!
//! Pure functions mapping `(unit price, quantity)` pairs to cart amounts.
//! Two distinct totals exist on purpose:
//!
//! - [`order_total`] is the raw sum of snapshot price times quantity. This
//!   is the value persisted on order headers and printed on invoices.
//! - [`quote`] additionally applies the 5% display tax shown on the cart
//!   and checkout screens. The tax is display-only and is never added to
//!   the persisted total.
//!
//! The rounding policy (half-up to the nearest minor unit) is part of the
//! contract: the server-side quote and any client-side preview must agree
//! bit-for-bit.

use crate::types::Cents;

/// Tax rate applied to cart quotes, in basis points per hundred (5%).
pub const TAX_RATE_PERCENT: i64 = 5;

/// A single priced cart line: unit price and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    /// Unit price in minor currency units.
    pub unit_price: Cents,
    /// Quantity, always >= 1 by the time it reaches the calculator.
    pub qty: u32,
}

impl PricedLine {
    /// Create a priced line.
    #[must_use]
    pub const fn new(unit_price: Cents, qty: u32) -> Self {
        Self { unit_price, qty }
    }

    /// The line amount: unit price times quantity.
    #[must_use]
    pub const fn amount(&self) -> Cents {
        self.unit_price.times(self.qty as i64)
    }
}

/// A cart quote: subtotal, display tax, and taxed grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CartQuote {
    /// Sum of line amounts.
    pub subtotal_cents: Cents,
    /// 5% of the subtotal, rounded half-up to the nearest minor unit.
    pub tax_cents: Cents,
    /// Subtotal plus tax.
    pub total_cents: Cents,
}

/// The order total persisted at checkout: the raw sum of line amounts,
/// with no tax applied.
#[must_use]
pub fn order_total(lines: &[PricedLine]) -> Cents {
    lines.iter().map(PricedLine::amount).sum()
}

/// Compute the taxed cart quote shown on cart and checkout screens.
///
/// Deterministic and side-effect free. Tax is `round(subtotal * 0.05)`
/// with half-up rounding, computed in integer arithmetic.
#[must_use]
pub fn quote(lines: &[PricedLine]) -> CartQuote {
    let subtotal = order_total(lines);
    let tax = Cents::new(round_half_up_percent(
        subtotal.as_i64(),
        TAX_RATE_PERCENT,
    ));

    CartQuote {
        subtotal_cents: subtotal,
        tax_cents: tax,
        total_cents: subtotal + tax,
    }
}

/// `round(amount * percent / 100)` with half-up rounding, for non-negative
/// amounts.
const fn round_half_up_percent(amount: i64, percent: i64) -> i64 {
    (amount * percent + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, qty: u32) -> PricedLine {
        PricedLine::new(Cents::new(price), qty)
    }

    #[test]
    fn test_order_total_is_untaxed_sum() {
        // Cart [{product at 8000, qty 2}] -> persisted total 16000, no tax
        let lines = [line(8000, 2)];
        assert_eq!(order_total(&lines), Cents::new(16_000));
    }

    #[test]
    fn test_order_total_multiple_lines() {
        let lines = [line(8000, 2), line(9000, 1), line(7000, 3)];
        assert_eq!(order_total(&lines), Cents::new(46_000));
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]), Cents::ZERO);
    }

    #[test]
    fn test_quote_adds_five_percent() {
        let q = quote(&[line(8000, 2)]);
        assert_eq!(q.subtotal_cents, Cents::new(16_000));
        assert_eq!(q.tax_cents, Cents::new(800));
        assert_eq!(q.total_cents, Cents::new(16_800));
    }

    #[test]
    fn test_quote_rounds_half_up() {
        // subtotal 10 -> exact tax 0.5, rounds up to 1
        let q = quote(&[line(10, 1)]);
        assert_eq!(q.tax_cents, Cents::new(1));
        assert_eq!(q.total_cents, Cents::new(11));

        // subtotal 9 -> exact tax 0.45, rounds down to 0
        let q = quote(&[line(9, 1)]);
        assert_eq!(q.tax_cents, Cents::ZERO);

        // subtotal 30 -> exact tax 1.5, rounds up to 2
        let q = quote(&[line(30, 1)]);
        assert_eq!(q.tax_cents, Cents::new(2));
    }

    #[test]
    fn test_quote_total_differs_from_order_total() {
        // The persisted order total never includes the display tax.
        let lines = [line(12_000, 1)];
        let q = quote(&lines);
        assert_eq!(order_total(&lines), Cents::new(12_000));
        assert_eq!(q.total_cents, Cents::new(12_600));
    }
}
