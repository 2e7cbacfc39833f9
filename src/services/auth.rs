//! Password hashing and the admin credential check.

use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

use crate::errors::{AppError, Result};
use crate::models::AdminUser;
use crate::session::AdminMarker;

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String> {
  if password.is_empty() {
    return Err(AppError::Internal("password cannot be empty for hashing".to_string()));
  }
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| {
      error!(error = %e, "argon2 password hashing failed");
      AppError::Internal(format!("password hashing failed: {}", e))
    })
}

/// Verifies a plain-text password against a stored Argon2 hash string.
/// `Ok(false)` is a mismatch; `Err` means the stored hash is unusable.
#[instrument(name = "auth::verify_password", skip_all)]
pub fn verify_password(hashed: &str, provided: &str) -> Result<bool> {
  let parsed = PasswordHash::new(hashed).map_err(|e| {
    error!(error = %e, "stored password hash is malformed");
    AppError::Internal(format!("invalid stored password hash: {}", e))
  })?;
  match Argon2::default().verify_password(provided.as_bytes(), &parsed) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(e) => {
      error!(error = %e, "argon2 verification failed");
      Err(AppError::Internal(format!("password verification failed: {}", e)))
    }
  }
}

/// Credential check for the admin login. An unknown username and a wrong
/// password collapse into the same `InvalidCredentials` so the response
/// cannot be used to probe for usernames.
#[instrument(name = "auth::authenticate_admin", skip(pool, password), fields(username = %username))]
pub async fn authenticate_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<AdminMarker> {
  let user: Option<AdminUser> =
    sqlx::query_as("SELECT id, username, password_hash FROM admin_users WHERE username = ?1")
      .bind(username)
      .fetch_optional(pool)
      .await?;

  let user = match user {
    Some(u) => u,
    None => {
      debug!("admin login failed: unknown username");
      return Err(AppError::InvalidCredentials);
    }
  };

  if verify_password(&user.password_hash, password)? {
    Ok(AdminMarker {
      id: user.id,
      username: user.username,
    })
  } else {
    debug!("admin login failed: password mismatch");
    Err(AppError::InvalidCredentials)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_then_verify_roundtrip() {
    let hash = hash_password("changeme123").unwrap();
    assert!(verify_password(&hash, "changeme123").unwrap());
    assert!(!verify_password(&hash, "wrong-password").unwrap());
  }

  #[test]
  fn hashes_are_salted() {
    let a = hash_password("changeme123").unwrap();
    let b = hash_password("changeme123").unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn empty_password_is_rejected() {
    assert!(hash_password("").is_err());
  }

  #[test]
  fn malformed_stored_hash_is_an_error_not_a_mismatch() {
    assert!(verify_password("not-a-phc-string", "pw").is_err());
  }
}
