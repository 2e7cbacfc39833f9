//! Connection pool and schema bootstrap. The schema is created in place on
//! startup; there is no migration history to carry for a store this size.

use crate::errors::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
  let pool = SqlitePoolOptions::new().max_connections(5).connect(database_url).await?;
  Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
  sqlx::query(
    "CREATE TABLE IF NOT EXISTS products (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       name TEXT NOT NULL,
       description TEXT,
       price INTEGER NOT NULL,
       stock INTEGER NOT NULL DEFAULT 0,
       image TEXT
     )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS orders (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       customer_name TEXT NOT NULL,
       email TEXT NOT NULL,
       phone TEXT,
       address TEXT NOT NULL,
       total INTEGER NOT NULL,
       created_at TEXT NOT NULL
     )",
  )
  .execute(pool)
  .await?;

  // product_id carries no foreign key: products may be deleted while their
  // historical order lines stay behind as an audit trail.
  sqlx::query(
    "CREATE TABLE IF NOT EXISTS order_items (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       order_id INTEGER NOT NULL,
       product_id INTEGER NOT NULL,
       qty INTEGER NOT NULL,
       price INTEGER NOT NULL,
       FOREIGN KEY(order_id) REFERENCES orders(id)
     )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS admin_users (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       username TEXT UNIQUE NOT NULL,
       password_hash TEXT NOT NULL
     )",
  )
  .execute(pool)
  .await?;

  sqlx::query(
    "CREATE TABLE IF NOT EXISTS sessions (
       id TEXT PRIMARY KEY,
       data TEXT NOT NULL,
       updated_at TEXT NOT NULL
     )",
  )
  .execute(pool)
  .await?;

  Ok(())
}
