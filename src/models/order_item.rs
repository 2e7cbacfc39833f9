use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub qty: i64,
  /// Unit price at the time of the order, not the product's current price.
  pub price: i64,
}

/// Order line joined with the product name for the admin detail view. The
/// name is optional: products may have been deleted since the order was
/// placed, and the historical line survives with a dangling reference.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItemDetail {
  pub product_id: i64,
  pub qty: i64,
  pub price: i64,
  pub name: Option<String>,
}
