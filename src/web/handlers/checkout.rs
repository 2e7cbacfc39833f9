//! Checkout handlers. The POST runs the order-placement transaction, then —
//! only after the commit — clears the cart and hands the invoice to the
//! mailer as a fire-and-forget task.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::redirect;
use crate::errors::AppError;
use crate::services::checkout::{self, CustomerDetails};
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct CheckoutForm {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub address: String,
}

#[instrument(name = "handler::checkout_page", skip(app_state, session))]
pub async fn checkout_page(app_state: web::Data<AppState>, session: Session) -> Result<HttpResponse, AppError> {
  if session.data.cart.is_empty() {
    return Ok(redirect("/cart"));
  }
  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(
    HttpResponse::Ok().cookie(cookie).json(json!({
      "items": session.data.cart.lines(),
      "total": session.data.cart.total(),
    })),
  )
}

#[instrument(name = "handler::checkout_submit", skip(app_state, session, form), fields(lines = session.data.cart.lines().len()))]
pub async fn submit(
  app_state: web::Data<AppState>,
  mut session: Session,
  form: web::Form<CheckoutForm>,
) -> Result<HttpResponse, AppError> {
  let customer = CustomerDetails {
    name: form.name.clone(),
    email: form.email.clone(),
    phone: form.phone.clone().filter(|p| !p.trim().is_empty()),
    address: form.address.clone(),
  };

  // Snapshot the lines before the cart is cleared; the invoice is rendered
  // from exactly what the transaction charged.
  let lines = session.data.cart.lines().to_vec();

  // EmptyCart and any persistence failure (including the insufficient-stock
  // short-circuit) come back as errors here, with the cart left intact so
  // the customer can resubmit.
  let placed = checkout::place_order(&app_state.db_pool, &session.data.cart, &customer).await?;

  app_state.mailer.dispatch_invoice(&placed, &customer, &lines);

  session.data.cart.clear();
  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;

  info!(order_id = placed.order_id, "checkout complete");
  Ok(
    HttpResponse::Ok().cookie(cookie).json(json!({
      "message": "Order placed successfully.",
      "orderId": placed.order_id,
      "total": placed.total,
    })),
  )
}
