//! Order totals and the policy that decides how far they are trusted.

use serde::{Deserialize, Serialize};

use crate::domain::order_fulfillment::errors::OrderError;
use crate::domain::shared::Money;

/// How client-supplied totals are treated during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalsPolicy {
    /// Fill in missing figures, then require
    /// `subtotal == Σ price × quantity` and `total == subtotal + tax + shipping`.
    #[default]
    Strict,
    /// Store whatever the client sent, coercing malformed figures to zero.
    Trusting,
}

/// Monetary summary of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax charged.
    pub tax: Money,
    /// Shipping charged.
    pub shipping: Money,
    /// Grand total.
    pub total: Money,
}

/// Totals as submitted, before any policy is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmittedTotals {
    /// Client subtotal, if any.
    pub subtotal: Option<Money>,
    /// Client tax, if any.
    pub tax: Option<Money>,
    /// Client shipping fee, if any.
    pub shipping: Option<Money>,
    /// Client grand total, if any.
    pub total: Option<Money>,
}

impl OrderTotals {
    /// Resolve submitted totals against the line-item sum.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTotals` when a submitted figure is above
    /// [`Money::MAX_ORDER_AMOUNT`]. Under [`TotalsPolicy::Strict`], also when
    /// a figure is negative or disagrees with the computed value at cent
    /// precision.
    pub fn resolve(
        submitted: SubmittedTotals,
        items_subtotal: Money,
        policy: TotalsPolicy,
    ) -> Result<Self, OrderError> {
        submitted.ensure_within_limit()?;

        match policy {
            TotalsPolicy::Trusting => Ok(Self {
                subtotal: submitted.subtotal.unwrap_or_default(),
                tax: submitted.tax.unwrap_or_default(),
                shipping: submitted.shipping.unwrap_or_default(),
                total: submitted.total.unwrap_or_default(),
            }),
            TotalsPolicy::Strict => {
                let subtotal = submitted.subtotal.unwrap_or(items_subtotal);
                let tax = non_negative("tax", submitted.tax.unwrap_or_default())?;
                let shipping = non_negative("shipping", submitted.shipping.unwrap_or_default())?;
                let expected_total = subtotal
                    .checked_add(tax)
                    .and_then(|sum| sum.checked_add(shipping))
                    .filter(|sum| !sum.exceeds_order_limit())
                    .ok_or_else(|| OrderError::amount_too_large("total"))?;
                let total = submitted.total.unwrap_or(expected_total);

                if !subtotal.same_cents(items_subtotal) {
                    return Err(OrderError::InvalidTotals {
                        field: "subtotal".to_string(),
                        message: format!(
                            "subtotal {subtotal} does not match item sum {items_subtotal}"
                        ),
                    });
                }
                if !total.same_cents(expected_total) {
                    return Err(OrderError::InvalidTotals {
                        field: "total".to_string(),
                        message: format!(
                            "total {total} does not equal subtotal + tax + shipping ({expected_total})"
                        ),
                    });
                }

                Ok(Self {
                    subtotal,
                    tax,
                    shipping,
                    total,
                })
            }
        }
    }
}

impl SubmittedTotals {
    fn ensure_within_limit(&self) -> Result<(), OrderError> {
        let figures = [
            ("subtotal", self.subtotal),
            ("tax", self.tax),
            ("shipping", self.shipping),
            ("total", self.total),
        ];
        match figures
            .into_iter()
            .find(|(_, amount)| amount.is_some_and(|a| a.exceeds_order_limit()))
        {
            Some((field, _)) => Err(OrderError::amount_too_large(field)),
            None => Ok(()),
        }
    }
}

fn non_negative(field: &str, amount: Money) -> Result<Money, OrderError> {
    amount
        .ensure_non_negative(field)
        .map_err(|e| OrderError::InvalidTotals {
            field: field.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(v: i64) -> Money {
        Money::from_cents(v)
    }

    #[test]
    fn strict_fills_missing_figures() {
        let totals =
            OrderTotals::resolve(SubmittedTotals::default(), cents(20_000), TotalsPolicy::Strict)
                .unwrap();

        assert_eq!(totals.subtotal, cents(20_000));
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, cents(20_000));
    }

    #[test]
    fn strict_accepts_consistent_totals() {
        let submitted = SubmittedTotals {
            subtotal: Some(cents(20_000)),
            tax: Some(cents(1_600)),
            shipping: Some(cents(999)),
            total: Some(cents(22_599)),
        };
        let totals = OrderTotals::resolve(submitted, cents(20_000), TotalsPolicy::Strict).unwrap();
        assert_eq!(totals.total, cents(22_599));
    }

    #[test]
    fn strict_computes_total_from_parts() {
        let submitted = SubmittedTotals {
            tax: Some(cents(100)),
            shipping: Some(cents(500)),
            ..SubmittedTotals::default()
        };
        let totals = OrderTotals::resolve(submitted, cents(1_000), TotalsPolicy::Strict).unwrap();
        assert_eq!(totals.total, cents(1_600));
    }

    #[test]
    fn strict_rejects_wrong_total() {
        let submitted = SubmittedTotals {
            subtotal: Some(cents(1_000)),
            total: Some(cents(1)),
            ..SubmittedTotals::default()
        };
        let err = OrderTotals::resolve(submitted, cents(1_000), TotalsPolicy::Strict).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "total"));
    }

    #[test]
    fn strict_rejects_subtotal_that_disagrees_with_items() {
        let submitted = SubmittedTotals {
            subtotal: Some(cents(500)),
            ..SubmittedTotals::default()
        };
        let err = OrderTotals::resolve(submitted, cents(1_000), TotalsPolicy::Strict).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "subtotal"));
    }

    #[test]
    fn strict_rejects_negative_tax() {
        let submitted = SubmittedTotals {
            tax: Some(cents(-1)),
            ..SubmittedTotals::default()
        };
        let err = OrderTotals::resolve(submitted, cents(1_000), TotalsPolicy::Strict).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "tax"));
    }

    #[test]
    fn strict_rejects_parts_that_sum_past_ceiling() {
        let submitted = SubmittedTotals {
            subtotal: Some(Money::MAX_ORDER_AMOUNT),
            tax: Some(Money::MAX_ORDER_AMOUNT),
            ..SubmittedTotals::default()
        };
        let err = OrderTotals::resolve(submitted, Money::MAX_ORDER_AMOUNT, TotalsPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "total"));
    }

    #[test]
    fn both_policies_reject_oversized_figures() {
        let submitted = SubmittedTotals {
            shipping: Some(Money::new(rust_decimal::Decimal::MAX)),
            ..SubmittedTotals::default()
        };
        for policy in [TotalsPolicy::Strict, TotalsPolicy::Trusting] {
            let err = OrderTotals::resolve(submitted, cents(1_000), policy).unwrap_err();
            assert!(
                matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "shipping")
            );
        }
    }

    #[test]
    fn trusting_stores_client_values() {
        let submitted = SubmittedTotals {
            subtotal: Some(cents(1)),
            total: Some(cents(2)),
            ..SubmittedTotals::default()
        };
        let totals =
            OrderTotals::resolve(submitted, cents(1_000), TotalsPolicy::Trusting).unwrap();
        assert_eq!(totals.subtotal, cents(1));
        assert_eq!(totals.tax, Money::ZERO);
        assert_eq!(totals.total, cents(2));
    }
}
