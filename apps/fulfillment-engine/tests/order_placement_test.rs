//! Order placement against the in-memory catalog.
//!
//! Covers stock conservation, the last-unit race between concurrent buyers,
//! and all-or-nothing reservation across multiple lines.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use serde_json::{Value, json};

use fulfillment_engine::application::use_cases::ListingLimits;
use fulfillment_engine::domain::order_fulfillment::{AssemblyPolicy, OrderRepository};
use fulfillment_engine::{
    ErrorCode, InMemoryCatalog, InMemoryOrderRepository, Money, NoOpEventPublisher,
    PlaceOrderUseCase, Product, ProductId, QueryOrdersUseCase, RawOrderSubmission, UserId,
};

type PlaceOrder = PlaceOrderUseCase<InMemoryOrderRepository, InMemoryCatalog, NoOpEventPublisher>;

struct Shop {
    orders: Arc<InMemoryOrderRepository>,
    catalog: Arc<InMemoryCatalog>,
    place_order: Arc<PlaceOrder>,
}

fn shop(products: Vec<Product>) -> Shop {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let catalog = Arc::new(InMemoryCatalog::with_products(products));
    let place_order = Arc::new(PlaceOrderUseCase::new(
        Arc::clone(&orders),
        Arc::clone(&catalog),
        Arc::new(NoOpEventPublisher),
        AssemblyPolicy::default(),
    ));
    Shop {
        orders,
        catalog,
        place_order,
    }
}

fn product(id: &str, title: &str, cents: i64, stock: u32) -> Product {
    Product::new(ProductId::new(id), title, "Acme", Money::from_cents(cents), stock)
}

fn submission(items: Value) -> RawOrderSubmission {
    serde_json::from_value(json!({
        "items": items,
        "shippingInfo": {"email": "a@b.com"},
        "paymentMethod": "cash"
    }))
    .unwrap()
}

fn one_of(id: &str, quantity: u32) -> RawOrderSubmission {
    submission(json!([
        {"title": "Monitor A", "price": 200, "quantity": quantity, "productId": id}
    ]))
}

#[tokio::test]
async fn sold_units_plus_remaining_stock_is_constant() {
    let s = shop(vec![product("p1", "Monitor A", 20_000, 10)]);

    let mut sold = 0;
    for quantity in [3, 4, 5, 2, 1] {
        if s
            .place_order
            .execute(one_of("p1", quantity), UserId::new("u1"))
            .await
            .is_ok()
        {
            sold += quantity;
        }
    }

    let remaining = s.catalog.stock_of(&ProductId::new("p1")).unwrap();
    assert_eq!(sold + remaining, 10);
    assert_eq!(sold, 10);
    assert_eq!(s.orders.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_buyers_race_for_the_last_unit() {
    let s = shop(vec![product("p1", "Monitor A", 20_000, 1)]);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let place_order = Arc::clone(&s.place_order);
            tokio::spawn(async move {
                place_order
                    .execute(one_of("p1", 1), UserId::new(format!("buyer-{i}")))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => {
                assert_eq!(e.code(), ErrorCode::InsufficientStock);
                assert_eq!(e.code().http_status().as_u16(), 409);
                losers += 1;
            }
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(losers, 7);
    assert_eq!(s.catalog.stock_of(&ProductId::new("p1")), Some(0));
    assert_eq!(s.orders.len(), 1);
}

#[tokio::test]
async fn multi_line_order_is_all_or_nothing() {
    let s = shop(vec![
        product("p1", "Monitor A", 20_000, 5),
        product("p2", "Cable", 999, 0),
    ]);

    let err = s
        .place_order
        .execute(
            submission(json!([
                {"title": "Monitor A", "price": 200, "quantity": 2, "productId": "p1"},
                {"title": "Cable", "price": 9.99, "quantity": 1, "productId": "p2"}
            ])),
            UserId::new("u1"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InsufficientStock);
    assert_eq!(s.catalog.stock_of(&ProductId::new("p1")), Some(5));
    assert_eq!(s.catalog.stock_of(&ProductId::new("p2")), Some(0));
    assert!(s.orders.is_empty());
}

#[tokio::test]
async fn unknown_product_is_not_found_and_changes_nothing() {
    let s = shop(vec![product("p1", "Monitor A", 20_000, 5)]);

    let err = s
        .place_order
        .execute(one_of("missing", 1), UserId::new("u1"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ProductNotFound);
    assert_eq!(err.code().http_status().as_u16(), 404);
    assert_eq!(s.catalog.stock_of(&ProductId::new("p1")), Some(5));
    assert!(s.orders.is_empty());
}

#[tokio::test]
async fn lines_without_product_id_skip_inventory() {
    let s = shop(vec![product("p1", "Monitor A", 20_000, 5)]);

    let placed = s
        .place_order
        .execute(
            submission(json!([{"title": "Gift wrap", "price": 5, "quantity": 3}])),
            UserId::new("u1"),
        )
        .await
        .unwrap();

    assert_eq!(placed.total, Money::from_cents(1_500));
    assert_eq!(s.catalog.stock_of(&ProductId::new("p1")), Some(5));
}

#[tokio::test]
async fn placed_order_reads_back_unchanged() {
    let s = shop(vec![product("p1", "Monitor A", 20_000, 5)]);
    let queries = QueryOrdersUseCase::new(Arc::clone(&s.orders), ListingLimits::default());

    let placed = s
        .place_order
        .execute(one_of("p1", 2), UserId::new("u1"))
        .await
        .unwrap();

    let stored = s
        .orders
        .find_by_order_id(&placed.order_id)
        .await
        .unwrap()
        .expect("order persisted");
    assert_eq!(stored.user_id(), &UserId::new("u1"));

    let fetched = queries.get(&placed.order_id).await.unwrap();
    let json = serde_json::to_value(&fetched).unwrap();

    assert_eq!(json["orderId"], placed.order_id.as_str());
    assert_eq!(json["status"], "pending");
    assert_eq!(json["paymentStatus"], "paid");
    assert_eq!(json["paymentMethod"], "cash");
    assert_eq!(json["shippingInfo"]["email"], "a@b.com");
    assert_eq!(json["shippingInfo"]["country"], "United States");
    assert_eq!(json["items"][0]["title"], "Monitor A");
    assert_eq!(json["items"][0]["quantity"], 2);
    assert_eq!(json["subtotal"], 400.0);
    assert_eq!(json["total"], 400.0);
    assert!(json["cardInfo"].is_null());
    assert!(json["trackingNumber"].is_null());
    assert_eq!(s.catalog.stock_of(&ProductId::new("p1")), Some(3));
}
