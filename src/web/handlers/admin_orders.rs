//! Admin dashboard and read-only order views.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use super::redirect;
use crate::errors::AppError;
use crate::models::{Order, OrderItemDetail, Product};
use crate::session::AdminSession;
use crate::state::AppState;

#[instrument(name = "handler::admin_dashboard", skip(app_state, admin), fields(admin = %admin.admin.username))]
pub async fn dashboard(app_state: web::Data<AppState>, admin: AdminSession) -> Result<HttpResponse, AppError> {
  let (orders_count, revenue): (i64, i64) =
    sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total), 0) FROM orders")
      .fetch_one(&app_state.db_pool)
      .await?;

  let items_sold: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(qty), 0) FROM order_items")
    .fetch_one(&app_state.db_pool)
    .await?;

  let products: Vec<Product> =
    sqlx::query_as("SELECT id, name, description, price, stock, image FROM products ORDER BY id DESC")
      .fetch_all(&app_state.db_pool)
      .await?;

  Ok(HttpResponse::Ok().json(json!({
    "user": { "id": admin.admin.id, "username": admin.admin.username },
    "ordersCount": orders_count,
    "revenue": revenue,
    "itemsSold": items_sold,
    "products": products,
  })))
}

#[instrument(name = "handler::admin_orders", skip(app_state, _admin))]
pub async fn list_orders(app_state: web::Data<AppState>, _admin: AdminSession) -> Result<HttpResponse, AppError> {
  let orders: Vec<Order> =
    sqlx::query_as("SELECT id, customer_name, email, phone, address, total, created_at FROM orders ORDER BY id DESC")
      .fetch_all(&app_state.db_pool)
      .await?;

  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(name = "handler::admin_order_detail", skip(app_state, _admin, path), fields(order_id = %path))]
pub async fn order_detail(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();

  let order: Option<Order> =
    sqlx::query_as("SELECT id, customer_name, email, phone, address, total, created_at FROM orders WHERE id = ?1")
      .bind(order_id)
      .fetch_optional(&app_state.db_pool)
      .await?;

  let order = match order {
    Some(order) => order,
    None => return Ok(redirect("/admin/orders")),
  };

  // LEFT JOIN: lines whose product was deleted keep their row with a null
  // name, so the audit trail stays complete.
  let items: Vec<OrderItemDetail> = sqlx::query_as(
    "SELECT oi.product_id, oi.qty, oi.price, p.name
     FROM order_items oi LEFT JOIN products p ON p.id = oi.product_id
     WHERE oi.order_id = ?1",
  )
  .bind(order.id)
  .fetch_all(&app_state.db_pool)
  .await?;

  Ok(HttpResponse::Ok().json(json!({ "order": order, "items": items })))
}
