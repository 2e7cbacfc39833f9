//! Public storefront views: catalog listing, product detail, health, 404.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::Product;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct IndexQuery {
  /// Set by the cart when an out-of-stock product was rejected; passed
  /// through so the listing can flag the product.
  pub oos: Option<i64>,
}

#[instrument(name = "handler::index", skip(app_state, session, query))]
pub async fn index(
  app_state: web::Data<AppState>,
  session: Session,
  query: web::Query<IndexQuery>,
) -> Result<HttpResponse, AppError> {
  let products: Vec<Product> = sqlx::query_as("SELECT id, name, description, price, stock, image FROM products")
    .fetch_all(&app_state.db_pool)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
    "products": products,
    "cartCount": session.data.cart.item_count(),
    "outOfStock": query.oos,
  })))
}

#[instrument(name = "handler::product_detail", skip(app_state, path), fields(product_id = %path))]
pub async fn product_detail(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let product: Option<Product> =
    sqlx::query_as("SELECT id, name, description, price, stock, image FROM products WHERE id = ?1")
      .bind(product_id)
      .fetch_optional(&app_state.db_pool)
      .await?;

  match product {
    Some(product) => Ok(HttpResponse::Ok().json(json!({ "product": product }))),
    None => Err(AppError::NotFound(format!("Product {} not found", product_id))),
  }
}

pub async fn health() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn not_found() -> HttpResponse {
  HttpResponse::NotFound().json(json!({ "error": "Page not found" }))
}
