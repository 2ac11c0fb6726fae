//! Order Assembly Service
//!
//! Turns a loosely-typed storefront submission into a validated, pending
//! [`Order`]. Coercion is lenient and happens first; the validity gate runs on
//! the normalized values. Stock is never touched here.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::order_fulfillment::aggregate::{LineItem, Order, PlaceOrderCommand};
use crate::domain::order_fulfillment::errors::OrderError;
use crate::domain::order_fulfillment::value_objects::{
    CardInfo, OrderTotals, PaymentMethod, PaymentStatus, ShippingInfo, SubmittedTotals,
    TotalsPolicy,
};
use crate::domain::shared::{Money, OrderId, ProductId, UserId};

const UNKNOWN_TITLE: &str = "Unknown Product";

/// Order submission exactly as received.
///
/// Every field stays a raw JSON value so coercion rules, not the
/// deserializer, decide what is acceptable. A client-supplied `status` is
/// accepted on the wire and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderSubmission {
    /// Client order id.
    #[serde(default)]
    pub order_id: Option<Value>,
    /// Line items.
    #[serde(default)]
    pub items: Option<Value>,
    /// Shipping contact and address.
    #[serde(default)]
    pub shipping_info: Option<Value>,
    /// `card` | `paypal` | `cash`.
    #[serde(default)]
    pub payment_method: Option<Value>,
    /// Card display data.
    #[serde(default)]
    pub card_info: Option<Value>,
    /// Client subtotal.
    #[serde(default)]
    pub subtotal: Option<Value>,
    /// Client tax.
    #[serde(default)]
    pub tax: Option<Value>,
    /// Client shipping fee.
    #[serde(default)]
    pub shipping: Option<Value>,
    /// Client grand total.
    #[serde(default)]
    pub total: Option<Value>,
    /// Customer notes.
    #[serde(default)]
    pub order_notes: Option<Value>,
    /// Ignored; orders always start pending.
    #[serde(default)]
    pub status: Option<Value>,
    /// Initial payment status.
    #[serde(default)]
    pub payment_status: Option<Value>,
}

/// Configurable assembly behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyPolicy {
    /// How client totals are checked.
    pub totals_policy: TotalsPolicy,
    /// Country used when shipping info has none.
    pub default_country: String,
    /// Payment status used when the client sends none.
    pub default_payment_status: PaymentStatus,
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self {
            totals_policy: TotalsPolicy::Strict,
            default_country: "United States".to_string(),
            default_payment_status: PaymentStatus::Paid,
        }
    }
}

/// Builds orders from raw submissions.
#[derive(Debug, Clone, Default)]
pub struct OrderAssembler {
    policy: AssemblyPolicy,
}

impl OrderAssembler {
    /// Create an assembler with the given policy.
    #[must_use]
    pub const fn new(policy: AssemblyPolicy) -> Self {
        Self { policy }
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> &AssemblyPolicy {
        &self.policy
    }

    /// Assemble a pending order for `user_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` for missing items, a missing email, or a bad
    ///   payment method or payment status
    /// - `InvalidItems` naming every line that fails the validity gate
    /// - `InvalidTotals` when strict totals do not add up
    pub fn assemble(
        &self,
        submission: &RawOrderSubmission,
        user_id: UserId,
    ) -> Result<Order, OrderError> {
        let raw_items = match submission.items.as_ref() {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                return Err(OrderError::InvalidParameters {
                    field: "items".to_string(),
                    message: "Items array is required".to_string(),
                });
            }
        };

        let shipping_info = self.shipping_info(submission.shipping_info.as_ref())?;
        let items: Vec<LineItem> = raw_items.iter().map(line_item).collect();
        let payment_method = payment_method(submission.payment_method.as_ref())?;
        let payment_status = self.payment_status(submission.payment_status.as_ref())?;

        let card_info = submission
            .card_info
            .as_ref()
            .and_then(Value::as_object)
            .map(|card| {
                CardInfo::from_display(
                    card.get("last4").and_then(Value::as_str),
                    card.get("nameOnCard").and_then(Value::as_str),
                )
            });

        let mut cmd = PlaceOrderCommand {
            order_id: order_id(submission.order_id.as_ref()),
            user_id,
            items,
            shipping_info,
            payment_method,
            card_info,
            totals: OrderTotals::default(),
            order_notes: submission
                .order_notes
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            payment_status,
        };
        cmd.validate()?;

        cmd.totals = OrderTotals::resolve(
            self.submitted_totals(submission)?,
            items_subtotal(&cmd.items)?,
            self.policy.totals_policy,
        )?;

        Order::place(cmd)
    }

    fn shipping_info(&self, raw: Option<&Value>) -> Result<ShippingInfo, OrderError> {
        let missing = || OrderError::InvalidParameters {
            field: "shippingInfo".to_string(),
            message: "Shipping info with email is required".to_string(),
        };
        let Some(Value::Object(fields)) = raw else {
            return Err(missing());
        };
        let email = text(fields, "email");
        if email.trim().is_empty() {
            return Err(missing());
        }

        let country = text(fields, "country");
        Ok(ShippingInfo {
            first_name: text(fields, "firstName"),
            last_name: text(fields, "lastName"),
            email,
            phone: text(fields, "phone"),
            address: text(fields, "address"),
            city: text(fields, "city"),
            state: text(fields, "state"),
            zip_code: text(fields, "zipCode"),
            country: if country.is_empty() {
                self.policy.default_country.clone()
            } else {
                country
            },
        })
    }

    fn payment_status(&self, raw: Option<&Value>) -> Result<PaymentStatus, OrderError> {
        match raw {
            None | Some(Value::Null) => Ok(self.policy.default_payment_status),
            Some(Value::String(s)) if s.is_empty() => Ok(self.policy.default_payment_status),
            Some(Value::String(s)) => s.parse(),
            Some(other) => other.to_string().parse(),
        }
    }

    fn submitted_totals(
        &self,
        submission: &RawOrderSubmission,
    ) -> Result<SubmittedTotals, OrderError> {
        let strict = self.policy.totals_policy == TotalsPolicy::Strict;
        let figure = |field: &str, raw: Option<&Value>| -> Result<Option<Money>, OrderError> {
            match (money(raw), strict) {
                (Ok(value), _) => Ok(value),
                (Err(_), false) => Ok(Some(Money::ZERO)),
                (Err(input), true) => Err(OrderError::InvalidTotals {
                    field: field.to_string(),
                    message: format!("'{input}' is not a number"),
                }),
            }
        };

        Ok(SubmittedTotals {
            subtotal: figure("subtotal", submission.subtotal.as_ref())?,
            tax: figure("tax", submission.tax.as_ref())?,
            shipping: figure("shipping", submission.shipping.as_ref())?,
            total: figure("total", submission.total.as_ref())?,
        })
    }
}

/// Σ price × quantity with every line and the running sum held under the
/// order amount ceiling.
fn items_subtotal(items: &[LineItem]) -> Result<Money, OrderError> {
    let mut subtotal = Money::ZERO;
    for (index, item) in items.iter().enumerate() {
        let line_total = item
            .line_total()
            .filter(|total| !total.exceeds_order_limit())
            .ok_or_else(|| OrderError::amount_too_large(&format!("items[{index}]")))?;
        subtotal = subtotal
            .checked_add(line_total)
            .filter(|total| !total.exceeds_order_limit())
            .ok_or_else(|| OrderError::amount_too_large("subtotal"))?;
    }
    Ok(subtotal)
}

fn payment_method(raw: Option<&Value>) -> Result<PaymentMethod, OrderError> {
    match raw.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.parse(),
        _ => Err(OrderError::InvalidParameters {
            field: "paymentMethod".to_string(),
            message: "Payment method is required".to_string(),
        }),
    }
}

/// Blank or non-textual ids are treated as absent.
fn order_id(raw: Option<&Value>) -> Option<OrderId> {
    let id = match raw? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then(|| OrderId::new(id))
}

fn line_item(raw: &Value) -> LineItem {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let title = [text(fields, "title"), text(fields, "name")]
        .into_iter()
        .find(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let price = money(fields.get("price")).ok().flatten().unwrap_or(Money::ZERO);
    let quantity = quantity(fields.get("quantity"));
    let product_id = ["productId", "_id"]
        .into_iter()
        .map(|key| identifier(fields.get(key)))
        .find(|id| !id.is_empty())
        .map(ProductId::new);

    LineItem::new(title, price, quantity, product_id)
        .with_display(text(fields, "brand"), text(fields, "imageUrl"))
}

/// Missing or malformed quantities become 1; explicit zero or negative
/// values become 0 so the validity gate rejects them.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantity(raw: Option<&Value>) -> u32 {
    let from_float = |f: f64| -> u32 {
        if !f.is_finite() {
            1
        } else if f < 1.0 {
            0
        } else {
            f.trunc().min(f64::from(u32::MAX)) as u32
        }
    };
    let from_signed = |n: i64| -> u32 { u32::try_from(n.max(0)).unwrap_or(u32::MAX) };

    match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(from_signed)
            .or_else(|| n.as_f64().map(from_float))
            .unwrap_or(1),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(from_signed)
                .or_else(|_| s.parse::<f64>().map(from_float))
                .unwrap_or(1)
        }
        _ => 1,
    }
}

/// `Ok(None)` when absent, `Err(input)` when present but not numeric.
fn money(raw: Option<&Value>) -> Result<Option<Money>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Money::parse("amount", &n.to_string())
            .map(Some)
            .map_err(|_| n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Money::parse("amount", s).map(Some).map_err(|_| s.clone()),
        Some(other) => Err(other.to_string()),
    }
}

fn identifier(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_fulfillment::value_objects::OrderStatus;
    use serde_json::json;
    use test_case::test_case;

    fn submission(body: Value) -> RawOrderSubmission {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "items": [{ "title": "Monitor A", "price": 100, "quantity": 2, "productId": "p1" }],
            "shippingInfo": { "email": "a@b.com", "firstName": "Ada" },
            "paymentMethod": "cash",
            "subtotal": 200,
            "total": 200
        })
    }

    fn assemble(body: Value) -> Result<Order, OrderError> {
        OrderAssembler::default().assemble(&submission(body), UserId::new("u1"))
    }

    #[test]
    fn assembles_round_trip_example() {
        let order = assemble(valid_body()).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Paid);
        assert_eq!(order.shipping_info().country, "United States");
        assert_eq!(order.shipping_info().phone, "");
        assert_eq!(order.items()[0].product_id().map(ProductId::as_str), Some("p1"));
        assert_eq!(order.totals().total, Money::from_cents(20_000));
    }

    #[test]
    fn client_status_is_ignored() {
        let mut body = valid_body();
        body["status"] = json!("delivered");
        assert_eq!(assemble(body).unwrap().status(), OrderStatus::Pending);
    }

    #[test]
    fn blank_order_id_is_generated() {
        let mut body = valid_body();
        body["orderId"] = json!("   ");
        assert!(assemble(body).unwrap().id().as_str().starts_with("ORD-"));

        let mut body = valid_body();
        body["orderId"] = json!("ORD-MINE");
        assert_eq!(assemble(body).unwrap().id().as_str(), "ORD-MINE");
    }

    #[test_case(json!(null) ; "null")]
    #[test_case(json!([]) ; "empty")]
    #[test_case(json!({"title": "x"}) ; "not an array")]
    fn rejects_missing_items(items: Value) {
        let mut body = valid_body();
        body["items"] = items;
        let err = assemble(body).unwrap_err();
        assert_eq!(err.to_string(), "Invalid order parameter 'items': Items array is required");
    }

    #[test]
    fn rejects_missing_email() {
        let mut body = valid_body();
        body["shippingInfo"] = json!({ "firstName": "Ada" });
        assert!(matches!(
            assemble(body).unwrap_err(),
            OrderError::InvalidParameters { ref field, .. } if field == "shippingInfo"
        ));
    }

    #[test_case(json!(2), 2 ; "integer")]
    #[test_case(json!("3"), 3 ; "numeric string")]
    #[test_case(json!(2.9), 2 ; "float truncates")]
    #[test_case(json!("abc"), 1 ; "malformed")]
    #[test_case(json!(null), 1 ; "null")]
    #[test_case(json!(0), 0 ; "explicit zero")]
    #[test_case(json!(-4), 0 ; "negative")]
    fn quantity_coercion(raw: Value, expected: u32) {
        assert_eq!(quantity(Some(&raw)), expected);
    }

    #[test]
    fn quantity_zero_is_rejected() {
        let mut body = valid_body();
        body["items"][0]["quantity"] = json!(0);
        assert_eq!(
            assemble(body).unwrap_err(),
            OrderError::InvalidItems { indexes: vec![0] }
        );
    }

    #[test]
    fn title_and_product_id_fall_back() {
        let item = line_item(&json!({ "name": "Cable", "price": "4.50", "_id": "p9" }));
        assert_eq!(item.title(), "Cable");
        assert_eq!(item.price(), Money::from_cents(450));
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.product_id().map(ProductId::as_str), Some("p9"));

        let anonymous = line_item(&json!({ "price": 1 }));
        assert_eq!(anonymous.title(), UNKNOWN_TITLE);
        assert!(anonymous.product_id().is_none());
    }

    #[test]
    fn malformed_price_is_rejected_by_gate() {
        let mut body = valid_body();
        body["items"][0]["price"] = json!("free");
        assert!(matches!(
            assemble(body).unwrap_err(),
            OrderError::InvalidItems { .. }
        ));
    }

    #[test]
    fn rejects_unknown_payment_method_and_status() {
        let mut body = valid_body();
        body["paymentMethod"] = json!("barter");
        assert!(assemble(body).is_err());

        let mut body = valid_body();
        body["paymentStatus"] = json!("maybe");
        assert!(assemble(body).is_err());

        let mut body = valid_body();
        body["paymentStatus"] = json!("pending");
        assert_eq!(assemble(body).unwrap().payment_status(), PaymentStatus::Pending);
    }

    #[test]
    fn strict_rejects_inconsistent_total() {
        let mut body = valid_body();
        body["total"] = json!(1);
        assert!(matches!(
            assemble(body).unwrap_err(),
            OrderError::InvalidTotals { .. }
        ));
    }

    #[test]
    fn line_total_that_overflows_is_rejected() {
        let mut body = valid_body();
        body["items"][0]["price"] = json!("50000000000000000000000000000");
        body.as_object_mut().unwrap().remove("subtotal");
        body.as_object_mut().unwrap().remove("total");

        let err = assemble(body).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "items[0]"));
    }

    #[test]
    fn subtotal_above_ceiling_is_rejected() {
        let mut body = valid_body();
        body["items"] = json!([
            { "title": "A", "price": "600000000000", "quantity": 1 },
            { "title": "B", "price": "600000000000", "quantity": 1 }
        ]);
        body.as_object_mut().unwrap().remove("subtotal");
        body.as_object_mut().unwrap().remove("total");

        let err = assemble(body).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { ref field, .. } if field == "subtotal"));
        assert!(err.to_string().contains("maximum order amount"));
    }

    #[test]
    fn trusting_still_checks_line_totals() {
        let assembler = OrderAssembler::new(AssemblyPolicy {
            totals_policy: TotalsPolicy::Trusting,
            ..AssemblyPolicy::default()
        });
        let mut body = valid_body();
        body["items"][0]["price"] = json!("50000000000000000000000000000");

        let err = assembler
            .assemble(&submission(body), UserId::new("u1"))
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTotals { .. }));
    }

    #[test]
    fn trusting_stores_client_totals() {
        let assembler = OrderAssembler::new(AssemblyPolicy {
            totals_policy: TotalsPolicy::Trusting,
            ..AssemblyPolicy::default()
        });
        let mut body = valid_body();
        body["total"] = json!("garbage");
        body["subtotal"] = json!(5);

        let order = assembler
            .assemble(&submission(body), UserId::new("u1"))
            .unwrap();
        assert_eq!(order.totals().subtotal, Money::from_cents(500));
        assert_eq!(order.totals().total, Money::ZERO);
    }

    #[test]
    fn card_info_kept_for_card_payments() {
        let mut body = valid_body();
        body["paymentMethod"] = json!("card");
        body["cardInfo"] = json!({ "last4": "4242", "nameOnCard": "Ada" });
        let order = assemble(body).unwrap();
        assert_eq!(order.card_info().and_then(CardInfo::last4), Some("4242"));
    }
}
