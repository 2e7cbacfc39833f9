pub mod auth;
pub mod checkout;
pub mod mailer;
