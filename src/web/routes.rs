use actix_web::web;

use crate::web::handlers::{admin_auth, admin_orders, admin_products, cart, checkout, shop};

/// Wires the full HTTP surface. Called from `main` (and from the HTTP-level
/// tests) to configure the Actix app.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Public storefront
    .route("/", web::get().to(shop::index))
    .route("/health", web::get().to(shop::health))
    .route("/product/{id}", web::get().to(shop::product_detail))
    // Cart (session-scoped)
    .route("/cart/add", web::post().to(cart::add))
    .route("/cart", web::get().to(cart::view))
    .route("/cart/update", web::post().to(cart::update))
    .route("/cart/clear", web::post().to(cart::clear))
    // Checkout
    .route("/checkout", web::get().to(checkout::checkout_page))
    .route("/checkout", web::post().to(checkout::submit))
    // Admin (everything except login/logout is gated by AdminSession)
    .service(
      web::scope("/admin")
        .route("/login", web::get().to(admin_auth::login_page))
        .route("/login", web::post().to(admin_auth::login))
        .route("/logout", web::post().to(admin_auth::logout))
        .route("", web::get().to(admin_orders::dashboard))
        .route("/orders", web::get().to(admin_orders::list_orders))
        .route("/orders/{id}", web::get().to(admin_orders::order_detail))
        .route("/products", web::get().to(admin_products::list))
        .route("/products", web::post().to(admin_products::create))
        .route("/products/{id}", web::post().to(admin_products::update))
        .route("/products/{id}/delete", web::post().to(admin_products::delete)),
    )
    .default_service(web::route().to(shop::not_found));
}
