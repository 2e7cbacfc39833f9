//! A small storefront: public catalog browsing with a session-held cart, an
//! all-or-nothing checkout transaction with guarded stock decrements, a
//! best-effort invoice mailer, and a cookie-gated admin surface for product
//! management and order reporting.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod web;
