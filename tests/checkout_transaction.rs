//! Order-placement transaction tests against an in-memory database: the
//! all-or-nothing commit, the guarded stock decrement, and the audit trail
//! surviving product deletion.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use storefront::db;
use storefront::errors::AppError;
use storefront::models::{Cart, Order, OrderItem};
use storefront::services::checkout::{place_order, CustomerDetails};

async fn test_pool() -> SqlitePool {
  // A single connection keeps every handle on the same in-memory database.
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .unwrap();
  db::init_schema(&pool).await.unwrap();
  pool
}

async fn insert_product(pool: &SqlitePool, name: &str, price: i64, stock: i64) -> i64 {
  sqlx::query("INSERT INTO products (name, description, price, stock, image) VALUES (?1, NULL, ?2, ?3, '')")
    .bind(name)
    .bind(price)
    .bind(stock)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid()
}

async fn stock_of(pool: &SqlitePool, id: i64) -> i64 {
  sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap()
}

fn customer() -> CustomerDetails {
  CustomerDetails {
    name: "Nguyen Van A".to_string(),
    email: "a@example.com".to_string(),
    phone: Some("0900000000".to_string()),
    address: "12 Hang Bac, Hanoi".to_string(),
  }
}

#[tokio::test]
async fn successful_checkout_commits_order_items_and_decrements() {
  let pool = test_pool().await;
  // Ids 1..3; the cart references 1 and 3 like the worked invoice example.
  let p1 = insert_product(&pool, "Bamboo pipe", 150_000, 20).await;
  let _p2 = insert_product(&pool, "Steel pipe", 220_000, 15).await;
  let p3 = insert_product(&pool, "Tobacco 100g", 90_000, 40).await;

  let mut cart = Cart::new();
  cart.add(p1, "Bamboo pipe", 150_000, 2);
  cart.add(p3, "Tobacco 100g", 90_000, 1);

  let placed = place_order(&pool, &cart, &customer()).await.unwrap();
  assert_eq!(placed.total, 390_000);

  let order: Order =
    sqlx::query_as("SELECT id, customer_name, email, phone, address, total, created_at FROM orders WHERE id = ?1")
      .bind(placed.order_id)
      .fetch_one(&pool)
      .await
      .unwrap();
  assert_eq!(order.total, 390_000);
  assert_eq!(order.customer_name, "Nguyen Van A");

  let items: Vec<OrderItem> =
    sqlx::query_as("SELECT id, order_id, product_id, qty, price FROM order_items WHERE order_id = ?1 ORDER BY id")
      .bind(placed.order_id)
      .fetch_all(&pool)
      .await
      .unwrap();
  assert_eq!(items.len(), 2);
  assert_eq!((items[0].product_id, items[0].qty, items[0].price), (p1, 2, 150_000));
  assert_eq!((items[1].product_id, items[1].qty, items[1].price), (p3, 1, 90_000));

  assert_eq!(stock_of(&pool, p1).await, 18);
  assert_eq!(stock_of(&pool, p3).await, 39);
}

#[tokio::test]
async fn one_short_line_rolls_back_the_whole_cart() {
  let pool = test_pool().await;
  let p1 = insert_product(&pool, "Bamboo pipe", 150_000, 20).await;
  let p2 = insert_product(&pool, "Tobacco 100g", 90_000, 2).await;

  let mut cart = Cart::new();
  cart.add(p1, "Bamboo pipe", 150_000, 1);
  cart.add(p2, "Tobacco 100g", 90_000, 5); // exceeds stock

  let err = place_order(&pool, &cart, &customer()).await.unwrap_err();
  assert!(matches!(err, AppError::InsufficientStock { product_id } if product_id == p2));

  // All or nothing: no order, no items, no stock movement on any line.
  let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(&pool).await.unwrap();
  let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
    .fetch_one(&pool)
    .await
    .unwrap();
  assert_eq!(orders, 0);
  assert_eq!(items, 0);
  assert_eq!(stock_of(&pool, p1).await, 20);
  assert_eq!(stock_of(&pool, p2).await, 2);
}

#[tokio::test]
async fn exact_stock_is_sellable_down_to_zero() {
  let pool = test_pool().await;
  let p1 = insert_product(&pool, "Bamboo pipe", 150_000, 3).await;

  let mut cart = Cart::new();
  cart.add(p1, "Bamboo pipe", 150_000, 3);

  place_order(&pool, &cart, &customer()).await.unwrap();
  assert_eq!(stock_of(&pool, p1).await, 0);

  // A second identical order now fails cleanly.
  let err = place_order(&pool, &cart, &customer()).await.unwrap_err();
  assert!(matches!(err, AppError::InsufficientStock { .. }));
  assert_eq!(stock_of(&pool, p1).await, 0);
}

#[tokio::test]
async fn empty_cart_is_rejected_before_touching_the_database() {
  let pool = test_pool().await;
  let err = place_order(&pool, &Cart::new(), &customer()).await.unwrap_err();
  assert!(matches!(err, AppError::EmptyCart));

  let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(&pool).await.unwrap();
  assert_eq!(orders, 0);
}

#[tokio::test]
async fn order_total_uses_snapshotted_prices_not_current_catalog() {
  let pool = test_pool().await;
  let p1 = insert_product(&pool, "Bamboo pipe", 150_000, 10).await;

  let mut cart = Cart::new();
  cart.add(p1, "Bamboo pipe", 150_000, 2);

  // Price change between add and checkout must not affect the charge.
  sqlx::query("UPDATE products SET price = 999999 WHERE id = ?1")
    .bind(p1)
    .execute(&pool)
    .await
    .unwrap();

  let placed = place_order(&pool, &cart, &customer()).await.unwrap();
  assert_eq!(placed.total, 300_000);

  let item_price: i64 = sqlx::query_scalar("SELECT price FROM order_items WHERE order_id = ?1")
    .bind(placed.order_id)
    .fetch_one(&pool)
    .await
    .unwrap();
  assert_eq!(item_price, 150_000);
}

#[tokio::test]
async fn deleting_a_product_keeps_its_historical_order_items() {
  let pool = test_pool().await;
  let p1 = insert_product(&pool, "Bamboo pipe", 150_000, 5).await;

  let mut cart = Cart::new();
  cart.add(p1, "Bamboo pipe", 150_000, 1);
  let placed = place_order(&pool, &cart, &customer()).await.unwrap();

  sqlx::query("DELETE FROM products WHERE id = ?1")
    .bind(p1)
    .execute(&pool)
    .await
    .unwrap();

  let items: Vec<OrderItem> =
    sqlx::query_as("SELECT id, order_id, product_id, qty, price FROM order_items WHERE order_id = ?1")
      .bind(placed.order_id)
      .fetch_all(&pool)
      .await
      .unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].product_id, p1);
}
