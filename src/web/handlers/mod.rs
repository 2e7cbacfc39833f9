pub mod admin_auth;
pub mod admin_orders;
pub mod admin_products;
pub mod cart;
pub mod checkout;
pub mod shop;

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::HttpResponse;

/// 303 redirect for the form-post flows.
pub fn redirect(location: &str) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location))
    .finish()
}

/// 303 redirect that also refreshes the session cookie.
pub fn redirect_with_session(location: &str, cookie: Cookie<'static>) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location))
    .cookie(cookie)
    .finish()
}

/// Numeric form fields default to 0 on missing or unparseable input.
pub(crate) fn parse_or_zero(raw: Option<&str>) -> i64 {
  raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0)
}
