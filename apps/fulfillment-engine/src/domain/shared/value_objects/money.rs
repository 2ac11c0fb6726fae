//! Money value object for prices and order totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// A monetary amount in the store currency.
///
/// Backed by a `Decimal` so line totals add up exactly. Serialized as a JSON
/// number to keep order documents readable by existing consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted for a price, line total or order figure
    /// (one trillion).
    pub const MAX_ORDER_AMOUNT: Self = Self(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a Money value from cents (integer).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse an amount from text.
    ///
    /// Accepts plain decimals (`"19.99"`) and scientific notation (`"1e3"`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unparseable` if the text is not a number.
    pub fn parse(field: &str, input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|_| DomainError::Unparseable {
                field: field.to_string(),
                input: input.to_string(),
            })
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if this amount is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true if this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// Round to 2 decimal places (banker's rounding).
    #[must_use]
    pub fn round(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Compare two amounts at cent precision.
    #[must_use]
    pub fn same_cents(&self, other: Self) -> bool {
        self.round() == other.round()
    }

    /// Add two amounts, or `None` if the result does not fit.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by a quantity, or `None` if the result does not fit.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Sum amounts, or `None` on the first overflow.
    #[must_use]
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }

    /// Add two amounts, clamping at the representable bounds.
    ///
    /// Used for reporting over stored orders, where one oversized record
    /// must not take the whole report down.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Multiply by a quantity, clamping at the representable bounds.
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Returns true if the magnitude is above [`Money::MAX_ORDER_AMOUNT`].
    #[must_use]
    pub fn exceeds_order_limit(&self) -> bool {
        self.0.abs() > Self::MAX_ORDER_AMOUNT.0
    }

    /// Reject negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` naming `field` when negative.
    pub fn ensure_non_negative(self, field: &str) -> Result<Self, DomainError> {
        if self.is_negative() {
            return Err(DomainError::InvalidValue {
                field: field.to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        Ok(self)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_display() {
        let m = Money::new(dec!(150.5));
        assert_eq!(format!("{m}"), "$150.50");
    }

    #[test]
    fn money_from_cents() {
        let m = Money::from_cents(15050);
        assert_eq!(m.amount(), dec!(150.50));
    }

    #[test]
    fn money_parse_plain_and_scientific() {
        assert_eq!(Money::parse("price", " 19.99 ").unwrap().amount(), dec!(19.99));
        assert_eq!(Money::parse("price", "1e3").unwrap().amount(), dec!(1000));
        assert!(Money::parse("price", "abc").is_err());
    }

    #[test]
    fn money_sign_predicates() {
        assert!(Money::ZERO.is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn money_same_cents() {
        let a = Money::new(dec!(10.001));
        let b = Money::new(dec!(10.00));
        assert!(a.same_cents(b));
        assert!(!a.same_cents(Money::new(dec!(10.01))));
    }

    #[test]
    fn money_ensure_non_negative() {
        assert!(Money::from_cents(-5).ensure_non_negative("tax").is_err());
        assert!(Money::ZERO.ensure_non_negative("tax").is_ok());
    }

    #[test]
    fn money_checked_arithmetic() {
        let price = Money::new(dec!(99.95));
        assert_eq!(price.checked_mul(3).unwrap().amount(), dec!(299.85));

        let total = Money::checked_sum([Money::from_cents(100), Money::from_cents(250)]).unwrap();
        assert_eq!(total.amount(), dec!(3.50));
        assert_eq!(Money::checked_sum([]), Some(Money::ZERO));
    }

    #[test]
    fn money_checked_arithmetic_reports_overflow() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(huge.checked_add(Money::from_cents(100)), None);
        assert_eq!(Money::checked_sum([huge, huge]), None);
    }

    #[test]
    fn money_saturating_arithmetic_clamps() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.saturating_add(huge), huge);
        assert_eq!(huge.saturating_mul(7), huge);
        assert_eq!(
            Money::from_cents(100).saturating_add(Money::from_cents(1)),
            Money::from_cents(101)
        );
    }

    #[test]
    fn money_order_limit() {
        assert_eq!(Money::MAX_ORDER_AMOUNT.amount(), dec!(1000000000000));
        assert!(!Money::MAX_ORDER_AMOUNT.exceeds_order_limit());
        assert!(Money::new(dec!(1000000000000.01)).exceeds_order_limit());
        assert!(Money::new(dec!(-1000000000001)).exceeds_order_limit());
    }

    #[test]
    fn money_serializes_as_number() {
        let json = serde_json::to_string(&Money::new(dec!(100))).unwrap();
        assert_eq!(json, "100.0");

        let parsed: Money = serde_json::from_str("349.99").unwrap();
        assert_eq!(parsed.amount(), dec!(349.99));
    }
}
