//! Best-effort invoice delivery over an HTTP transactional-mail API.
//!
//! Dispatch happens after the checkout transaction has committed and runs on
//! a spawned task: a slow or failing send never delays the confirmation
//! response and never reverses the committed order. Failures are logged and
//! dropped. Without an API key the mailer runs in log-only mode.

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::models::CartLine;
use crate::services::checkout::{CustomerDetails, PlacedOrder};

pub struct Mailer {
  http: reqwest::Client,
  api_url: String,
  api_key: Option<String>,
  from: String,
  notify: Option<String>,
}

/// Renders the invoice body from the cart snapshot the order was placed
/// with, so the email always matches what was charged.
pub fn render_invoice_html(
  order_id: i64,
  customer: &CustomerDetails,
  lines: &[CartLine],
  total: i64,
  created_at: DateTime<Utc>,
) -> String {
  let rows: String = lines
    .iter()
    .map(|l| {
      format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        l.name,
        l.qty,
        l.price,
        l.subtotal()
      )
    })
    .collect();

  format!(
    "<h2>Invoice #{order_id}</h2>\
     <p>Customer: {name}</p>\
     <p>Email: {email}</p>\
     <p>Phone: {phone}</p>\
     <p>Address: {address}</p>\
     <table border=\"1\" cellpadding=\"6\" cellspacing=\"0\">\
     <thead><tr><th>Product</th><th>Qty</th><th>Unit price</th><th>Subtotal</th></tr></thead>\
     <tbody>{rows}</tbody>\
     <tfoot><tr><td colspan=\"3\"><b>Total</b></td><td><b>{total}</b></td></tr></tfoot>\
     </table>\
     <p>Ordered at: {created_at}</p>",
    order_id = order_id,
    name = customer.name,
    email = customer.email,
    phone = customer.phone.as_deref().unwrap_or(""),
    address = customer.address,
    rows = rows,
    total = total,
    created_at = created_at.to_rfc3339(),
  )
}

impl Mailer {
  pub fn from_config(config: &AppConfig) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_url: config.mail_api_url.clone(),
      api_key: config.mail_api_key.clone(),
      from: config.mail_from.clone(),
      notify: config.shop_notification_email.clone(),
    }
  }

  /// Queues the invoice email for the customer (and the shop notification
  /// address, when configured). Fire-and-forget: the caller gets no result.
  pub fn dispatch_invoice(&self, order: &PlacedOrder, customer: &CustomerDetails, lines: &[CartLine]) {
    let subject = format!("Order confirmation #{}", order.order_id);
    let html = render_invoice_html(order.order_id, customer, lines, order.total, order.created_at);
    let recipients: Vec<String> = std::iter::once(customer.email.clone()).chain(self.notify.clone()).collect();

    let Some(api_key) = self.api_key.clone() else {
      info!(order_id = order.order_id, to = ?recipients, "mailer disabled, skipping invoice delivery");
      return;
    };

    let http = self.http.clone();
    let api_url = self.api_url.clone();
    let from = self.from.clone();
    let order_id = order.order_id;

    tokio::spawn(async move {
      if let Err(e) = send(&http, &api_url, &api_key, &from, &recipients, &subject, &html).await {
        // Logged only. The order is already committed and stays committed.
        error!(order_id, error = %e, "invoice email delivery failed");
      } else {
        info!(order_id, "invoice email dispatched");
      }
    });
  }
}

#[instrument(name = "mailer::send", skip_all, fields(subject = %subject))]
async fn send(
  http: &reqwest::Client,
  api_url: &str,
  api_key: &str,
  from: &str,
  recipients: &[String],
  subject: &str,
  html: &str,
) -> anyhow::Result<()> {
  let to: Vec<_> = recipients.iter().map(|r| json!({ "email": r })).collect();
  let response = http
    .post(api_url)
    .header("api-key", api_key)
    .json(&json!({
      "sender": { "email": from },
      "to": to,
      "subject": subject,
      "htmlContent": html,
    }))
    .send()
    .await?;

  let status = response.status();
  if !status.is_success() {
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("mail API returned {}: {}", status, body);
  }
  Ok(())
}
