//! Database-backed checkout tests.
//!
//! These run only when `DATABASE_URL` points at a disposable Postgres
//! database (migrations are applied on the fly); without it each test
//! returns early. Every row they create is keyed to a throwaway user so
//! repeated runs do not interfere with each other.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use iceshopz_core::{ProductId, UserId};
use iceshopz_server::error::AppError;
use iceshopz_server::models::{ORDER_STATUS_PAID, OrderItemRequest};
use iceshopz_server::services::OrderService;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    Some(pool)
}

async fn insert_user(pool: &PgPool) -> UserId {
    let email = format!("checkout-{}@example.com", Uuid::new_v4());
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role)
         VALUES ('Checkout Test', $1, 'not-a-real-hash', 'user')
         RETURNING id",
    )
    .bind(&email)
    .fetch_one(pool)
    .await
    .expect("insert user");
    UserId::new(id)
}

async fn insert_product(pool: &PgPool, name: &str, price_cents: i64) -> ProductId {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO products (name, description, price_cents, image_url)
         VALUES ($1, 'test product', $2, 'https://example.com/x.jpg')
         RETURNING id",
    )
    .bind(name)
    .bind(price_cents)
    .fetch_one(pool)
    .await
    .expect("insert product");
    ProductId::new(id)
}

async fn order_count(pool: &PgPool, user_id: UserId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("count orders")
}

async fn item_count(pool: &PgPool, user_id: UserId) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM order_items oi
         JOIN orders o ON o.id = oi.order_id
         WHERE o.user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("count order items")
}

fn line(product_id: ProductId, qty: Option<i32>) -> OrderItemRequest {
    OrderItemRequest { product_id, qty }
}

#[tokio::test]
async fn an_unknown_product_anywhere_in_the_cart_writes_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let user_id = insert_user(&pool).await;
    let product_id = insert_product(&pool, "Rainbow Cone", 8_000).await;

    // Valid first line, bogus second line: the whole checkout must fail
    // without leaving a header or any item rows behind.
    let items = [
        line(product_id, Some(2)),
        line(ProductId::new(i32::MAX), Some(1)),
    ];
    let result = OrderService::new(&pool).place_order(user_id, &items).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(order_count(&pool, user_id).await, 0);
    assert_eq!(item_count(&pool, user_id).await, 0);
}

#[tokio::test]
async fn a_valid_checkout_persists_the_untaxed_total_and_snapshots() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let user_id = insert_user(&pool).await;
    let cone = insert_product(&pool, "Rainbow Cone", 8_000).await;
    let shake = insert_product(&pool, "Mango Shake", 11_000).await;

    let items = [line(cone, Some(2)), line(shake, None)];
    let order = OrderService::new(&pool)
        .place_order(user_id, &items)
        .await
        .expect("checkout succeeds");

    // 2 x 8000 + 1 x 11000, no tax baked in.
    assert_eq!(order.total_cents.as_i64(), 27_000);
    assert_eq!(order.status, ORDER_STATUS_PAID);
    assert_eq!(order.user_id, user_id);

    assert_eq!(order_count(&pool, user_id).await, 1);
    assert_eq!(item_count(&pool, user_id).await, 2);

    // The snapshot column holds the price at order time.
    let snapshot: i64 = sqlx::query_scalar(
        "SELECT price_cents FROM order_items oi
         JOIN orders o ON o.id = oi.order_id
         WHERE o.user_id = $1 AND oi.product_id = $2",
    )
    .bind(user_id)
    .bind(cone)
    .fetch_one(&pool)
    .await
    .expect("read snapshot");
    assert_eq!(snapshot, 8_000);
}
