use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A completed checkout. Immutable once created; there is no update path.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
  pub id: i64,
  pub customer_name: String,
  pub email: String,
  pub phone: Option<String>,
  pub address: String,
  /// Sum of line-item subtotals at order time.
  pub total: i64,
  pub created_at: DateTime<Utc>,
}
