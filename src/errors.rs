use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Checkout was attempted against an empty cart. Not an error page: the
  /// customer is bounced back to the cart instead.
  #[error("Cart is empty")]
  EmptyCart,

  #[error("Invalid username or password")]
  InvalidCredentials,

  /// An /admin/* route was hit without an authenticated admin session.
  #[error("Admin authentication required")]
  AdminRequired,

  #[error("Database Error: {0}")]
  Persistence(#[from] sqlx::Error),

  /// A guarded stock decrement matched zero rows. Surfaced to the customer
  /// as the same generic failure as any other persistence error.
  #[error("Insufficient stock for product {product_id}")]
  InsufficientStock { product_id: i64 },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Session Error: {0}")]
  Session(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Lets handlers use `?` on helpers that return anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    if err.is::<sqlx::Error>() {
      return AppError::Persistence(err.downcast::<sqlx::Error>().unwrap());
    }
    AppError::Internal(err.to_string())
  }
}

fn redirect_to(location: &str) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location))
    .finish()
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({ "error": m })),
      // Redirects, not error pages.
      AppError::EmptyCart => redirect_to("/cart"),
      AppError::AdminRequired => redirect_to("/admin/login"),
      // One generic message for both unknown-user and wrong-password, so the
      // response cannot be used to enumerate usernames.
      AppError::InvalidCredentials => {
        HttpResponse::Unauthorized().json(json!({ "error": "Invalid username or password" }))
      }
      AppError::Persistence(e) => {
        tracing::error!(error = %e, "storage operation failed");
        HttpResponse::InternalServerError().json(json!({ "error": "Storage operation failed" }))
      }
      AppError::InsufficientStock { product_id } => {
        // Same outward shape as Persistence; the distinction only matters in logs.
        tracing::warn!(product_id, "checkout rejected: insufficient stock");
        HttpResponse::InternalServerError().json(json!({ "error": "Storage operation failed" }))
      }
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({ "error": "Configuration issue", "detail": m }))
      }
      AppError::Session(m) => {
        tracing::error!(detail = %m, "session handling failed");
        HttpResponse::InternalServerError().json(json!({ "error": "Session handling failed" }))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({ "error": "An internal error occurred", "detail": m }))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
