//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::application::ports::{CatalogPort, EventPublisherPort, NotificationPort};
use crate::application::use_cases::{
    CreateInvoiceUseCase, DeleteOrderUseCase, NotifyOrderUseCase, OrderStatsUseCase,
    PlaceOrderUseCase, QueryInvoicesUseCase, QueryOrdersUseCase, SetProductStockUseCase,
    UpdateOrderStatusUseCase,
};
use crate::domain::invoicing::InvoiceRepository;
use crate::domain::order_fulfillment::{OrderRepository, RawOrderSubmission};
use crate::domain::shared::{InvoiceId, OrderId, ProductId};
use crate::error::ServiceError;

use super::auth::{AdminPrincipal, Principal};
use super::request::{
    CreateInvoiceBody, ListOrdersQuery, NotifyBody, SetStockBody, StatsQuery, UpdateStatusBody,
    UserOrdersQuery,
};
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<O, C, E, N, I>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    /// Use case for placing orders.
    pub place_order: Arc<PlaceOrderUseCase<O, C, E>>,
    /// Use case for listings and lookups.
    pub query_orders: Arc<QueryOrdersUseCase<O>>,
    /// Use case for status changes.
    pub update_status: Arc<UpdateOrderStatusUseCase<O, E>>,
    /// Use case for statistics.
    pub order_stats: Arc<OrderStatsUseCase<O>>,
    /// Use case for deletion.
    pub delete_order: Arc<DeleteOrderUseCase<O, E>>,
    /// Use case for customer notifications.
    pub notify_order: Arc<NotifyOrderUseCase<O, N>>,
    /// Use case for stock administration.
    pub set_stock: Arc<SetProductStockUseCase<C>>,
    /// Use case for issuing invoices.
    pub create_invoice: Arc<CreateInvoiceUseCase<I, C>>,
    /// Use case for reading invoices.
    pub query_invoices: Arc<QueryInvoicesUseCase<I>>,
    /// Application version.
    pub version: String,
}

impl<O, C, E, N, I> Clone for AppState<O, C, E, N, I>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            query_orders: Arc::clone(&self.query_orders),
            update_status: Arc::clone(&self.update_status),
            order_stats: Arc::clone(&self.order_stats),
            delete_order: Arc::clone(&self.delete_order),
            notify_order: Arc::clone(&self.notify_order),
            set_stock: Arc::clone(&self.set_stock),
            create_invoice: Arc::clone(&self.create_invoice),
            query_invoices: Arc::clone(&self.query_invoices),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<O, C, E, N, I>(state: AppState<O, C, E, N, I>) -> Router
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/orders", post(place_order).get(list_orders))
        .route("/orders/stats", get(order_stats))
        .route("/orders/user/{user_id}", get(user_orders))
        .route(
            "/orders/{order_id}",
            get(get_order).patch(update_status).delete(delete_order),
        )
        .route("/orders/{order_id}/notify", post(notify_order))
        .route("/products/{product_id}/stock", put(set_stock))
        .route("/invoices", post(create_invoice).get(list_invoices))
        .route("/invoices/mine", get(my_invoices))
        .route("/invoices/{invoice_id}", get(get_invoice))
        .with_state(state)
}

/// Endpoint list logged at startup.
pub const ENDPOINTS: [&str; 14] = [
    "GET    /health",
    "POST   /orders",
    "GET    /orders",
    "GET    /orders/stats",
    "GET    /orders/user/{userId}",
    "GET    /orders/{orderId}",
    "PATCH  /orders/{orderId}",
    "DELETE /orders/{orderId}",
    "POST   /orders/{orderId}/notify",
    "PUT    /products/{productId}/stock",
    "POST   /invoices",
    "GET    /invoices",
    "GET    /invoices/mine",
    "GET    /invoices/{invoiceId}",
];

/// Health check endpoint.
async fn health_check<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
) -> impl IntoResponse
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Place an order for the calling account.
async fn place_order<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    principal: Principal,
    body: Result<Json<RawOrderSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Json(submission) = body?;
    let order = state
        .place_order
        .execute(submission, principal.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Admin listing.
async fn list_orders<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Query(query) = query?;
    let listing = state.query_orders.list_admin(query.into_request()).await?;
    Ok(Json(listing))
}

/// Statistics report.
async fn order_stats<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Query(query) = query?;
    let stats = state.order_stats.execute(query.period).await?;
    Ok(Json(stats))
}

/// A user's own orders.
async fn user_orders<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _principal: Principal,
    Path(user_id): Path<String>,
    query: Result<Query<UserOrdersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Query(query) = query?;
    let page = state
        .query_orders
        .list_for_user(query.into_request(user_id))
        .await?;
    Ok(Json(page))
}

/// Fetch one order.
async fn get_order<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _principal: Principal,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let order = state.query_orders.get(&OrderId::new(order_id)).await?;
    Ok(Json(order))
}

/// Change an order's status.
async fn update_status<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    Path(order_id): Path<String>,
    body: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Json(body) = body?;
    let order = state
        .update_status
        .execute(&OrderId::new(order_id), body.into())
        .await?;
    Ok(Json(order))
}

/// Delete an order.
async fn delete_order<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    state.delete_order.execute(&OrderId::new(order_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Notify the customer about an order.
async fn notify_order<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    Path(order_id): Path<String>,
    body: Result<Json<NotifyBody>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Json(body) = body?;
    let response = state
        .notify_order
        .execute(&OrderId::new(order_id), body.into())
        .await?;
    Ok(Json(response))
}

/// Overwrite a product's stock level.
async fn set_stock<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
    Path(product_id): Path<String>,
    body: Result<Json<SetStockBody>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Json(body) = body?;
    let response = state
        .set_stock
        .execute(&ProductId::new(product_id), body.stock)
        .await?;
    Ok(Json(response))
}

/// Issue an invoice for the calling account.
async fn create_invoice<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    principal: Principal,
    body: Result<Json<CreateInvoiceBody>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let Json(body) = body?;
    let invoice = state
        .create_invoice
        .execute(body.into(), principal.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Every invoice.
async fn list_invoices<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    _admin: AdminPrincipal,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    Ok(Json(state.query_invoices.list_all().await?))
}

/// The caller's own invoices.
async fn my_invoices<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    principal: Principal,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    Ok(Json(
        state.query_invoices.list_for_user(&principal.user_id).await?,
    ))
}

/// Fetch one invoice.
async fn get_invoice<O, C, E, N, I>(
    State(state): State<AppState<O, C, E, N, I>>,
    principal: Principal,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    O: OrderRepository + 'static,
    C: CatalogPort + 'static,
    E: EventPublisherPort + 'static,
    N: NotificationPort + 'static,
    I: InvoiceRepository + 'static,
{
    let invoice = state
        .query_invoices
        .get(
            &InvoiceId::new(invoice_id),
            &principal.user_id,
            principal.is_admin(),
        )
        .await?;
    Ok(Json(invoice))
}
