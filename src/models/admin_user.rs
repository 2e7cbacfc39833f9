use serde::Serialize;
use sqlx::FromRow;

/// Provisioned out-of-band by the `init-admin` tool, never via the public
/// surface.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminUser {
  pub id: i64,
  pub username: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
}
