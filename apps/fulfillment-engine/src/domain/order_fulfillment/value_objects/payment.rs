//! Payment summary value objects.
//!
//! The service never talks to a payment gateway; these only describe how the
//! customer chose to pay and what the storefront reported back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::order_fulfillment::errors::OrderError;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// PayPal account.
    Paypal,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::Paypal),
            "cash" => Ok(Self::Cash),
            other => Err(OrderError::InvalidParameters {
                field: "paymentMethod".to_string(),
                message: format!("'{other}' is not one of: card, paypal, cash"),
            }),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state, tracked independently of the fulfillment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    Pending,
    /// Payment captured.
    #[default]
    Paid,
    /// Payment attempt failed.
    Failed,
    /// Payment returned to the customer.
    Refunded,
}

impl PaymentStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(OrderError::InvalidParameters {
                field: "paymentStatus".to_string(),
                message: format!("'{other}' is not one of: pending, paid, failed, refunded"),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-only card details.
///
/// Holds at most the last four digits and the cardholder name. Anything
/// longer supplied as `last4` is cut down to its final four digits, so a full
/// card number can never be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_on_card: Option<String>,
}

impl CardInfo {
    /// Build card display data from whatever the storefront sent.
    #[must_use]
    pub fn from_display(last4: Option<&str>, name_on_card: Option<&str>) -> Self {
        let last4 = last4.map(|raw| {
            let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
            digits[digits.len().saturating_sub(4)..].iter().collect::<String>()
        });
        Self {
            last4: last4.filter(|d| !d.is_empty()),
            name_on_card: name_on_card.map(str::to_string),
        }
    }

    /// Last four card digits.
    #[must_use]
    pub fn last4(&self) -> Option<&str> {
        self.last4.as_deref()
    }

    /// Cardholder name.
    #[must_use]
    pub fn name_on_card(&self) -> Option<&str> {
        self.name_on_card.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_parse() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn payment_status_defaults_to_paid() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Paid);
        assert_eq!(
            "refunded".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Refunded
        );
        assert!("chargeback".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn card_info_keeps_only_last_four_digits() {
        let card = CardInfo::from_display(Some("4111 1111 1111 1234"), Some("Ada L"));
        assert_eq!(card.last4(), Some("1234"));
        assert_eq!(card.name_on_card(), Some("Ada L"));
    }

    #[test]
    fn card_info_short_and_missing_values() {
        let card = CardInfo::from_display(Some("42"), None);
        assert_eq!(card.last4(), Some("42"));
        assert_eq!(card.name_on_card(), None);

        let empty = CardInfo::from_display(Some("n/a"), None);
        assert_eq!(empty.last4(), None);
    }

    #[test]
    fn card_info_serializes_camel_case() {
        let card = CardInfo::from_display(Some("1234"), Some("Ada L"));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["last4"], "1234");
        assert_eq!(json["nameOnCard"], "Ada L");
    }
}
