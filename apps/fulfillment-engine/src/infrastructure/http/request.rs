//! HTTP request DTOs.
//!
//! Query parameters are kept as raw strings; parsing and fallbacks happen in
//! the application layer.

use serde::{Deserialize, Serialize};

use crate::application::dto::{
    CreateInvoiceRequest, InvoiceLineRequest, ListOrdersRequest, NotifyOrderRequest,
    UpdateOrderStatusRequest, UserOrdersRequest,
};

/// Query string of `GET /orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    /// One-based page.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// Force (`true`) or suppress (`false`) the pagination envelope.
    pub paginate: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Payment status filter.
    pub payment_status: Option<String>,
    /// Account filter.
    pub user_id: Option<String>,
    /// Inclusive lower bound on `createdAt`.
    pub start_date: Option<String>,
    /// Inclusive upper bound on `createdAt`.
    pub end_date: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

impl ListOrdersQuery {
    /// Whether the response should carry the pagination envelope.
    ///
    /// An explicit `paginate` flag wins. Without one, the envelope is used
    /// whenever `page` or `limit` is present.
    #[must_use]
    pub fn wants_envelope(&self) -> bool {
        match self.paginate.as_deref().map(str::trim) {
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            _ => self.page.is_some() || self.limit.is_some(),
        }
    }

    /// Convert into the application request.
    #[must_use]
    pub fn into_request(self) -> ListOrdersRequest {
        let paginate = self.wants_envelope();
        ListOrdersRequest {
            status: self.status,
            payment_status: self.payment_status,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            search: self.search,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            page: self.page,
            limit: self.limit,
            paginate,
        }
    }
}

/// Query string of `GET /orders/user/{userId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserOrdersQuery {
    /// Status filter.
    pub status: Option<String>,
    /// One-based page.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
}

impl UserOrdersQuery {
    /// Convert into the application request for `user_id`.
    #[must_use]
    pub fn into_request(self, user_id: String) -> UserOrdersRequest {
        UserOrdersRequest {
            user_id,
            status: self.status,
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Query string of `GET /orders/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    /// `week`, `month` or `year`; anything else means all time.
    pub period: Option<String>,
}

/// Body of `PATCH /orders/{orderId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    /// Target status.
    #[serde(default)]
    pub status: String,
    /// Replacement tracking number.
    #[serde(default)]
    pub tracking_number: Option<String>,
}

impl From<UpdateStatusBody> for UpdateOrderStatusRequest {
    fn from(body: UpdateStatusBody) -> Self {
        Self {
            status: body.status,
            tracking_number: body.tracking_number,
        }
    }
}

/// Body of `POST /orders/{orderId}/notify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyBody {
    /// Free-form category.
    #[serde(default)]
    pub notification_type: String,
    /// Body text.
    #[serde(default)]
    pub message: String,
    /// Recipient override.
    #[serde(default)]
    pub email: Option<String>,
}

impl From<NotifyBody> for NotifyOrderRequest {
    fn from(body: NotifyBody) -> Self {
        Self {
            notification_type: body.notification_type,
            message: body.message,
            email: body.email,
        }
    }
}

/// Body of `PUT /products/{productId}/stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStockBody {
    /// New absolute stock level.
    pub stock: i64,
}

/// Body of `POST /invoices`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateInvoiceBody {
    /// Requested products.
    #[serde(default)]
    pub products: Vec<InvoiceProductBody>,
}

/// One entry of `CreateInvoiceBody::products`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceProductBody {
    /// Catalog product id.
    #[serde(default)]
    pub product: String,
    /// Units wanted; one when omitted.
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl From<CreateInvoiceBody> for CreateInvoiceRequest {
    fn from(body: CreateInvoiceBody) -> Self {
        Self {
            lines: body
                .products
                .into_iter()
                .map(|p| InvoiceLineRequest {
                    product_id: p.product,
                    quantity: p.quantity.unwrap_or(1),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn query(page: Option<&str>, limit: Option<&str>, paginate: Option<&str>) -> ListOrdersQuery {
        ListOrdersQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            paginate: paginate.map(str::to_string),
            ..ListOrdersQuery::default()
        }
    }

    #[test_case(None, None, None, false ; "no paging params")]
    #[test_case(Some("2"), None, None, true ; "page present")]
    #[test_case(None, Some("5"), None, true ; "limit present")]
    #[test_case(Some("2"), None, Some("false"), false ; "explicit false wins")]
    #[test_case(None, None, Some("true"), true ; "explicit true wins")]
    #[test_case(None, None, Some("maybe"), false ; "unrecognized flag falls back")]
    fn envelope_selection(
        page: Option<&str>,
        limit: Option<&str>,
        paginate: Option<&str>,
        expected: bool,
    ) {
        assert_eq!(query(page, limit, paginate).wants_envelope(), expected);
    }

    #[test]
    fn list_query_uses_camel_case_names() {
        let parsed: ListOrdersQuery = serde_json::from_value(serde_json::json!({
            "paymentStatus": "paid",
            "sortBy": "total",
            "startDate": "2024-01-01"
        }))
        .unwrap();
        let request = parsed.into_request();
        assert_eq!(request.payment_status.as_deref(), Some("paid"));
        assert_eq!(request.sort_by.as_deref(), Some("total"));
        assert_eq!(request.start_date.as_deref(), Some("2024-01-01"));
        assert!(!request.paginate);
    }

    #[test]
    fn invoice_quantity_defaults_to_one() {
        let body: CreateInvoiceBody = serde_json::from_value(serde_json::json!({
            "products": [{"product": "p1"}, {"product": "p2", "quantity": 3}]
        }))
        .unwrap();
        let request = CreateInvoiceRequest::from(body);
        assert_eq!(request.lines[0].quantity, 1);
        assert_eq!(request.lines[1].product_id, "p2");
        assert_eq!(request.lines[1].quantity, 3);
    }
}
