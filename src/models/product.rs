use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  /// Smallest currency unit; never negative.
  pub price: i64,
  pub stock: i64,
  pub image: Option<String>,
}
