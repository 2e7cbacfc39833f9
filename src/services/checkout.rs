//! The order-placement transaction: cart snapshot in, committed order out.
//!
//! Everything happens inside one write transaction: the order header, one
//! order item per cart line, and a guarded stock decrement per line. The
//! guarded decrement (`WHERE stock >= qty`) is the sole overselling defense;
//! when it matches zero rows the whole transaction rolls back and nothing
//! persists. SQLite serializes writers, so no additional row locking is
//! layered on top.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result};
use crate::models::Cart;

/// Contact details from the checkout form. Presence of required fields is
/// enforced by form deserialization; no further format validation is done.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub address: String,
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
  pub order_id: i64,
  pub total: i64,
  pub created_at: DateTime<Utc>,
}

/// Atomically persists an order for the given cart snapshot.
///
/// The total is computed from the cart's snapshotted prices, not re-read from
/// the catalog. On any failure — including a line whose quantity exceeds the
/// stock still available at commit time — the transaction rolls back in full
/// and the cart is left untouched for a retry.
#[instrument(
  name = "checkout::place_order",
  skip(pool, cart, customer),
  fields(lines = cart.lines().len(), total = cart.total())
)]
pub async fn place_order(pool: &SqlitePool, cart: &Cart, customer: &CustomerDetails) -> Result<PlacedOrder> {
  if cart.is_empty() {
    return Err(AppError::EmptyCart);
  }

  let total = cart.total();
  let created_at = Utc::now();

  let mut tx = pool.begin().await?;

  let order_id = sqlx::query(
    "INSERT INTO orders (customer_name, email, phone, address, total, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
  )
  .bind(&customer.name)
  .bind(&customer.email)
  .bind(&customer.phone)
  .bind(&customer.address)
  .bind(total)
  .bind(created_at)
  .execute(&mut *tx)
  .await?
  .last_insert_rowid();

  for line in cart.lines() {
    sqlx::query("INSERT INTO order_items (order_id, product_id, qty, price) VALUES (?1, ?2, ?3, ?4)")
      .bind(order_id)
      .bind(line.id)
      .bind(line.qty)
      .bind(line.price)
      .execute(&mut *tx)
      .await?;

    // Guarded decrement: only applies while enough stock remains. A
    // concurrent checkout that drained the stock first turns this into a
    // zero-row update, never a negative stock value.
    let decremented = sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1")
      .bind(line.qty)
      .bind(line.id)
      .execute(&mut *tx)
      .await?;

    if decremented.rows_affected() == 0 {
      warn!(product_id = line.id, qty = line.qty, "insufficient stock, rolling back order");
      tx.rollback().await?;
      return Err(AppError::InsufficientStock { product_id: line.id });
    }
  }

  tx.commit().await?;
  info!(order_id, total, "order committed");

  Ok(PlacedOrder {
    order_id,
    total,
    created_at,
  })
}
