use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  /// Keys the tamper-evident session cookie signature.
  pub session_secret: String,

  // Outbound transactional-mail API. With no API key configured the
  // dispatcher logs invoices instead of delivering them.
  pub mail_api_url: String,
  pub mail_api_key: Option<String>,
  pub mail_from: String,
  /// Extra recipient copied on every invoice (the shop owner's inbox).
  pub shop_notification_email: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "3000".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite://storefront.db?mode=rwc".to_string());

    let session_secret = match get_env("SESSION_SECRET") {
      Ok(secret) => secret,
      Err(_) => {
        tracing::warn!("SESSION_SECRET not set, falling back to the development secret");
        "dev-secret".to_string()
      }
    };

    let mail_api_url = get_env("MAIL_API_URL").unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string());
    let mail_api_key = get_env("MAIL_API_KEY").ok();
    let mail_from = get_env("MAIL_FROM").unwrap_or_else(|_| "noreply@example.com".to_string());
    let shop_notification_email = get_env("SHOP_NOTIFICATION_EMAIL").ok();

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      session_secret,
      mail_api_url,
      mail_api_key,
      mail_from,
      shop_notification_email,
    })
  }
}
