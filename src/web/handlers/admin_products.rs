//! Admin product CRUD. No validation beyond numeric coercion (default 0),
//! last write wins, and failures log and bounce back to the listing rather
//! than render an error page.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};

use super::{parse_or_zero, redirect};
use crate::errors::AppError;
use crate::models::Product;
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct ProductForm {
  pub name: String,
  pub description: Option<String>,
  pub price: Option<String>,
  pub stock: Option<String>,
  pub image: Option<String>,
}

#[instrument(name = "handler::admin_products", skip(app_state, _admin))]
pub async fn list(app_state: web::Data<AppState>, _admin: AdminSession) -> Result<HttpResponse, AppError> {
  let products: Vec<Product> =
    sqlx::query_as("SELECT id, name, description, price, stock, image FROM products ORDER BY id DESC")
      .fetch_all(&app_state.db_pool)
      .await?;

  Ok(HttpResponse::Ok().json(json!({ "products": products, "error": null })))
}

#[instrument(name = "handler::admin_product_create", skip(app_state, _admin, form), fields(name = %form.name))]
pub async fn create(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
  let result = sqlx::query("INSERT INTO products (name, description, price, stock, image) VALUES (?1, ?2, ?3, ?4, ?5)")
    .bind(&form.name)
    .bind(&form.description)
    .bind(parse_or_zero(form.price.as_deref()))
    .bind(parse_or_zero(form.stock.as_deref()))
    .bind(form.image.as_deref().unwrap_or(""))
    .execute(&app_state.db_pool)
    .await;

  if let Err(e) = result {
    error!(error = %e, "product create failed");
  }
  Ok(redirect("/admin/products"))
}

#[instrument(name = "handler::admin_product_update", skip(app_state, _admin, form, path), fields(product_id = %path))]
pub async fn update(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  path: web::Path<i64>,
  form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  // Full overwrite by id; admin edits set stock absolutely.
  let result = sqlx::query("UPDATE products SET name = ?1, description = ?2, price = ?3, stock = ?4, image = ?5 WHERE id = ?6")
    .bind(&form.name)
    .bind(&form.description)
    .bind(parse_or_zero(form.price.as_deref()))
    .bind(parse_or_zero(form.stock.as_deref()))
    .bind(form.image.as_deref().unwrap_or(""))
    .bind(product_id)
    .execute(&app_state.db_pool)
    .await;

  if let Err(e) = result {
    error!(product_id, error = %e, "product update failed");
  }
  Ok(redirect("/admin/products"))
}

#[instrument(name = "handler::admin_product_delete", skip(app_state, _admin, path), fields(product_id = %path))]
pub async fn delete(
  app_state: web::Data<AppState>,
  _admin: AdminSession,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  // Historical order items keep their product_id; the delete does not
  // cascade into the audit trail.
  let result = sqlx::query("DELETE FROM products WHERE id = ?1")
    .bind(product_id)
    .execute(&app_state.db_pool)
    .await;

  if let Err(e) = result {
    error!(product_id, error = %e, "product delete failed");
  }
  Ok(redirect("/admin/products"))
}
