//! Server-side sessions. The cookie carries only a random session id plus a
//! keyed digest; the session record itself (cart lines and the admin marker)
//! lives in the `sessions` table. Handlers receive the session as an explicit
//! extracted value and call [`Session::persist`] after mutating it.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::Cart;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sid";

/// Sessions idle longer than this are dead: the cookie expires client-side
/// and the server record is ignored and swept.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Set by a successful admin login, cleared on logout. Its presence is what
/// gates every /admin/* route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMarker {
  pub id: i64,
  pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
  pub cart: Cart,
  pub admin: Option<AdminMarker>,
}

#[derive(Debug)]
pub struct Session {
  id: String,
  pub data: SessionData,
}

/// Keyed digest of the session id. Not an HMAC construction, but the id is a
/// fixed-length random token, so extension attacks do not apply here.
fn sign(secret: &str, id: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(secret.as_bytes());
  hasher.update(id.as_bytes());
  hasher
    .finalize()
    .iter()
    .map(|b| format!("{:02x}", b))
    .collect::<String>()
}

/// Splits and verifies an `id.signature` cookie value. Returns the session id
/// only when the signature matches under the configured secret.
fn verify_cookie_value(secret: &str, value: &str) -> Option<String> {
  let (id, sig) = value.split_once('.')?;
  if Uuid::parse_str(id).is_err() {
    return None;
  }
  if sign(secret, id) == sig {
    Some(id.to_string())
  } else {
    None
  }
}

impl Session {
  fn fresh() -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      data: SessionData::default(),
    }
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  /// Loads the session referenced by the request cookie, or starts a fresh
  /// one when the cookie is absent, tampered with, or references a record
  /// that no longer exists.
  pub async fn load(pool: &SqlitePool, secret: &str, cookie_value: Option<&str>) -> Result<Self> {
    let id = match cookie_value.and_then(|v| verify_cookie_value(secret, v)) {
      Some(id) => id,
      None => {
        if cookie_value.is_some() {
          warn!("session cookie failed verification, issuing a fresh session");
        }
        return Ok(Self::fresh());
      }
    };

    let row: Option<(String, DateTime<Utc>)> =
      sqlx::query_as("SELECT data, updated_at FROM sessions WHERE id = ?1")
        .bind(&id)
        .fetch_optional(pool)
        .await?;

    match row {
      Some((_, updated_at)) if Utc::now() - updated_at > Duration::hours(SESSION_TTL_HOURS) => {
        debug!(session_id = %id, "session record expired, starting fresh");
        sqlx::query("DELETE FROM sessions WHERE id = ?1").bind(&id).execute(pool).await?;
        Ok(Self::fresh())
      }
      Some((raw, _)) => match serde_json::from_str::<SessionData>(&raw) {
        Ok(data) => Ok(Self { id, data }),
        Err(e) => {
          warn!(session_id = %id, error = %e, "stored session record is unreadable, resetting");
          Ok(Self { id, data: SessionData::default() })
        }
      },
      None => {
        debug!(session_id = %id, "session record missing, starting fresh");
        Ok(Self::fresh())
      }
    }
  }

  /// Deletes every session record idle past the TTL. Run at startup and on
  /// an interval; the per-request path only ever touches its own record.
  pub async fn purge_expired(pool: &SqlitePool) -> Result<u64> {
    let cutoff = Utc::now() - Duration::hours(SESSION_TTL_HOURS);
    let purged = sqlx::query("DELETE FROM sessions WHERE updated_at < ?1")
      .bind(cutoff)
      .execute(pool)
      .await?
      .rows_affected();
    if purged > 0 {
      debug!(purged, "swept expired sessions");
    }
    Ok(purged)
  }

  /// Upserts the session record and returns the cookie to attach to the
  /// response.
  pub async fn persist(&self, pool: &SqlitePool, secret: &str) -> Result<Cookie<'static>> {
    let raw = serde_json::to_string(&self.data).map_err(|e| AppError::Session(e.to_string()))?;
    sqlx::query(
      "INSERT INTO sessions (id, data, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
    )
    .bind(&self.id)
    .bind(&raw)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let value = format!("{}.{}", self.id, sign(secret, &self.id));
    Ok(
      Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::hours(SESSION_TTL_HOURS))
        .finish(),
    )
  }
}

impl FromRequest for Session {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Session, AppError>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let state = req.app_data::<web::Data<AppState>>().cloned();
    let cookie_value = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    Box::pin(async move {
      let state = state.ok_or_else(|| AppError::Internal("application state is not configured".to_string()))?;
      Session::load(&state.db_pool, &state.config.session_secret, cookie_value.as_deref()).await
    })
  }
}

/// Extractor for /admin/* handlers: an authenticated session or a redirect
/// to the login page, decided before the handler body runs.
#[derive(Debug)]
pub struct AdminSession {
  pub session: Session,
  pub admin: AdminMarker,
}

impl FromRequest for AdminSession {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<AdminSession, AppError>>;

  fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
    let session_fut = Session::from_request(req, payload);
    Box::pin(async move {
      let session = session_fut.await?;
      match session.data.admin.clone() {
        Some(admin) => Ok(AdminSession { session, admin }),
        None => Err(AppError::AdminRequired),
      }
    })
  }
}
