//! The session-held cart. An ordered list of purchase intents; nothing here
//! touches the database. Name and price are snapshotted when a line is added
//! and are deliberately not refreshed if the product changes afterwards —
//! the checkout transaction charges the snapshotted price.

use serde::{Deserialize, Serialize};

/// Upper bound on a single line's quantity. The qty field arrives straight
/// from a form, so without a cap a hostile value could overflow the i64
/// subtotal arithmetic.
pub const MAX_LINE_QTY: i64 = 999_999;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
  pub id: i64,
  pub name: String,
  pub price: i64,
  pub qty: i64,
}

impl CartLine {
  pub fn subtotal(&self) -> i64 {
    self.price.saturating_mul(self.qty)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Total number of units across all lines (the cart badge count).
  pub fn item_count(&self) -> i64 {
    self.lines.iter().map(|l| l.qty).sum()
  }

  /// Sum of price × quantity over all lines. The same computation backs the
  /// cart view, the checkout view and the persisted order total.
  pub fn total(&self) -> i64 {
    self.lines.iter().fold(0i64, |acc, l| acc.saturating_add(l.subtotal()))
  }

  /// Merges into an existing line for the same product, otherwise appends a
  /// new line. Quantity is clamped to 1..=MAX_LINE_QTY, merge included.
  /// Stock is not checked here; the caller decides whether the product is
  /// addable at all.
  pub fn add(&mut self, id: i64, name: &str, price: i64, qty: i64) {
    let qty = qty.clamp(1, MAX_LINE_QTY);
    match self.lines.iter_mut().find(|l| l.id == id) {
      Some(line) => line.qty = line.qty.saturating_add(qty).min(MAX_LINE_QTY),
      None => self.lines.push(CartLine {
        id,
        name: name.to_string(),
        price,
        qty,
      }),
    }
  }

  /// Sets a line's quantity; zero or negative removes the line, anything
  /// above the cap is clamped down to it. Updating a product that is not in
  /// the cart is a no-op.
  pub fn update(&mut self, id: i64, qty: i64) {
    let qty = qty.clamp(0, MAX_LINE_QTY);
    if qty == 0 {
      self.lines.retain(|l| l.id != id);
    } else if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
      line.qty = qty;
    }
  }

  pub fn clear(&mut self) {
    self.lines.clear();
  }
}
