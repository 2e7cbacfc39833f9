//! Admin login and logout. Success plants the admin marker in the session;
//! the `AdminSession` extractor gates everything else under /admin.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::redirect_with_session;
use crate::errors::AppError;
use crate::services::auth;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

pub async fn login_page() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "message": "Admin login", "error": null }))
}

#[instrument(name = "handler::admin_login", skip(app_state, session, form), fields(username = %form.username))]
pub async fn login(
  app_state: web::Data<AppState>,
  mut session: Session,
  form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
  // Unknown username and wrong password surface identically.
  let admin = auth::authenticate_admin(&app_state.db_pool, &form.username, &form.password).await?;

  info!(admin_id = admin.id, "admin login successful");
  session.data.admin = Some(admin);

  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(redirect_with_session("/admin", cookie))
}

#[instrument(name = "handler::admin_logout", skip(app_state, session))]
pub async fn logout(app_state: web::Data<AppState>, mut session: Session) -> Result<HttpResponse, AppError> {
  session.data.admin = None;
  let cookie = session.persist(&app_state.db_pool, &app_state.config.session_secret).await?;
  Ok(redirect_with_session("/admin/login", cookie))
}
