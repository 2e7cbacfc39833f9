//! Cart mutation and view handlers. The cart itself lives in the session
//! record; these handlers load it, apply one operation, persist it back and
//! answer with a redirect (mutations) or a JSON view.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::{redirect_with_session, parse_or_zero};
use crate::errors::AppError;
use crate::models::Product;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct AddToCartForm {
  pub product_id: i64,
  pub qty: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCartForm {
  pub id: i64,
  pub qty: Option<String>,
}

#[instrument(name = "handler::cart_add", skip(app_state, session, form), fields(product_id = form.product_id))]
pub async fn add(
  app_state: web::Data<AppState>,
  mut session: Session,
  form: web::Form<AddToCartForm>,
) -> Result<HttpResponse, AppError> {
  let qty = parse_or_zero(form.qty.as_deref()).max(1);

  let product: Option<Product> =
    sqlx::query_as("SELECT id, name, description, price, stock, image FROM products WHERE id = ?1")
      .bind(form.product_id)
      .fetch_optional(&app_state.db_pool)
      .await?;

  let product = product.ok_or_else(|| AppError::NotFound(format!("Product {} not found", form.product_id)))?;

  // Out of stock at add time: leave the cart untouched and bounce back to
  // the listing with the product flagged. The only other stock check is the
  // guarded decrement at checkout.
  if product.stock <= 0 {
    let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
    return Ok(redirect_with_session(&format!("/?oos={}", product.id), cookie));
  }

  session.data.cart.add(product.id, &product.name, product.price, qty);
  info!(product_id = product.id, qty, "added to cart");

  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(redirect_with_session("/cart", cookie))
}

#[instrument(name = "handler::cart_view", skip(app_state, session))]
pub async fn view(app_state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(
    HttpResponse::Ok().cookie(cookie).json(json!({
      "items": session.data.cart.lines(),
      "total": session.data.cart.total(),
      "cartCount": session.data.cart.item_count(),
    })),
  )
}

#[instrument(name = "handler::cart_update", skip(app_state, session, form), fields(product_id = form.id))]
pub async fn update(
  app_state: web::Data<AppState>,
  mut session: Session,
  form: web::Form<UpdateCartForm>,
) -> Result<HttpResponse, AppError> {
  let qty = parse_or_zero(form.qty.as_deref());
  session.data.cart.update(form.id, qty);

  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(redirect_with_session("/cart", cookie))
}

#[instrument(name = "handler::cart_clear", skip(app_state, session))]
pub async fn clear(app_state: web::Data<AppState>, mut session: Session) -> Result<HttpResponse, AppError> {
  session.data.cart.clear();
  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(redirect_with_session("/cart", cookie))
}
