//! Money amounts in integer minor currency units.
//!
//! All prices and totals in the system are stored as integer paise
//! (hundredths of a rupee). Integer arithmetic avoids floating-point
//! rounding drift between what is displayed, persisted, and invoiced.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// An amount of money in minor currency units (paise).
///
/// ## Examples
///
/// ```
/// use iceshopz_core::Cents;
///
/// let price = Cents::new(8000);
/// assert_eq!(price.as_i64(), 8000);
/// assert_eq!(price.format_inr(), "₹80.00");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new amount from minor units.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying minor-unit value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Multiply a unit price by a quantity to get a line amount.
    #[must_use]
    pub const fn times(self, qty: i64) -> Self {
        Self(self.0 * qty)
    }

    /// Format as a localized INR currency string with lakh/crore digit
    /// grouping, e.g. `₹1,23,456.78`.
    ///
    /// Matches the `en-IN` currency formatting used by the checkout
    /// preview, so invoice amounts and on-screen amounts agree.
    #[must_use]
    pub fn format_inr(&self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let rupees = abs / 100;
        let paise = abs % 100;

        let digits = rupees.to_string();
        let grouped = group_indian(&digits);

        if negative {
            format!("-₹{grouped}.{paise:02}")
        } else {
            format!("₹{grouped}.{paise:02}")
        }
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Cents {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Cents> for i64 {
    fn from(amount: Cents) -> Self {
        amount.0
    }
}

/// Group an unsigned decimal digit string in the Indian style: the last
/// three digits form one group, every two digits before that form another
/// (`1234567` -> `12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let bytes = head.as_bytes();
    let mut end = bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cents {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cents {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cents {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amount() {
        assert_eq!(Cents::new(0).format_inr(), "₹0.00");
        assert_eq!(Cents::new(5).format_inr(), "₹0.05");
        assert_eq!(Cents::new(8000).format_inr(), "₹80.00");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(Cents::new(123_456).format_inr(), "₹1,234.56");
        assert_eq!(Cents::new(100_000).format_inr(), "₹1,000.00");
    }

    #[test]
    fn test_format_lakh_grouping() {
        // 1,23,456.78 - the Indian grouping splits after the first three
        // digits, then every two
        assert_eq!(Cents::new(12_345_678).format_inr(), "₹1,23,456.78");
        assert_eq!(Cents::new(1_234_567_800).format_inr(), "₹1,23,45,678.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(Cents::new(-8050).format_inr(), "-₹80.50");
    }

    #[test]
    fn test_times_and_sum() {
        let lines = [Cents::new(8000).times(2), Cents::new(9000).times(1)];
        let total: Cents = lines.into_iter().sum();
        assert_eq!(total, Cents::new(25_000));
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("1"), "1");
        assert_eq!(group_indian("123"), "123");
        assert_eq!(group_indian("1234"), "1,234");
        assert_eq!(group_indian("123456"), "1,23,456");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }
}
