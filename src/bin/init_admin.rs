//! One-shot provisioning tool: creates an admin credential. Admin accounts
//! are never created through the public surface.
//!
//! Usage: `init-admin [username] [password]`

use anyhow::Context;
use storefront::config::AppConfig;
use storefront::services::auth;
use storefront::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let mut args = std::env::args().skip(1);
  let username = args.next().unwrap_or_else(|| "admin".to_string());
  let password = args.next().unwrap_or_else(|| "changeme123".to_string());

  let config = AppConfig::from_env().context("loading configuration")?;
  let pool = db::connect(&config.database_url).await.context("connecting to database")?;
  db::init_schema(&pool).await.context("initializing schema")?;

  let hash = auth::hash_password(&password).context("hashing password")?;

  let result = sqlx::query("INSERT OR IGNORE INTO admin_users (username, password_hash) VALUES (?1, ?2)")
    .bind(&username)
    .bind(&hash)
    .execute(&pool)
    .await
    .context("inserting admin user")?;

  if result.rows_affected() == 0 {
    println!("Admin '{}' already exists, nothing to do.", username);
  } else {
    println!("Created admin: {}/{}", username, password);
  }

  Ok(())
}
