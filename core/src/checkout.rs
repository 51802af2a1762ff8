// core/src/checkout.rs

//! Checkout validation and commit.
//!
//! The commit is the one correctness-critical path in the crate: a
//! requested quantity must never be committed against stock that is
//! smaller than requested at commit time. Pre-validation screens the cart
//! against its cached snapshots; the commit itself goes through the
//! catalog's guarded decrement, which re-checks live stock atomically per
//! line. If the loop fails partway, decrements already applied in the same
//! call are compensated best-effort before the failure is surfaced.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart::CartController;
use crate::models::LineItem;
use crate::stores::{CatalogStore, StoreError};

/// How long the checkout success signal stays valid before UI surfaces
/// should stop showing it.
pub const SUCCESS_NOTICE_TTL_MS: i64 = 3_500;

/// One line whose requested quantity exceeds known stock.
#[derive(Debug, Clone, Serialize)]
pub struct StockViolation {
  pub product_id: Uuid,
  pub title: String,
  pub available: i64,
  pub requested: u32,
}

impl StockViolation {
  /// Displayable per-item message for the cart review screen.
  pub fn message(&self) -> String {
    format!(
      "Only {} left in stock for \"{}\" (requested {}).",
      self.available, self.title, self.requested
    )
  }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
  #[error("Cart is empty.")]
  EmptyCart,

  /// Pre-validation found over-limit lines. Remote state and the cart are
  /// untouched.
  #[error("Checkout rejected: {} item(s) exceed available stock.", .0.len())]
  Rejected(Vec<StockViolation>),

  /// The commit loop failed partway. The cart is kept; decrements applied
  /// before the failure have been compensated where possible.
  #[error("Checkout could not be completed. Please try again.")]
  Commit {
    #[source]
    source: StoreError,
  },
}

/// Transient success signal, auto-expiring after a fixed interval.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
  pub message: String,
  pub expires_at: DateTime<Utc>,
}

impl Notice {
  fn order_placed() -> Self {
    Self {
      message: "Order placed successfully.".to_string(),
      expires_at: Utc::now() + Duration::milliseconds(SUCCESS_NOTICE_TTL_MS),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
  pub lines: Vec<LineItem>,
  pub total_cents: i64,
  pub completed_at: DateTime<Utc>,
  pub notice: Notice,
}

/// Validates the cart against stock and commits the purchase.
///
/// On success every line's quantity has been decremented from live stock,
/// the cart is cleared and its persisted record deleted. On any failure
/// the cart is left untouched.
pub async fn commit_checkout(
  controller: &mut CartController,
  catalog: &dyn CatalogStore,
) -> Result<CheckoutReceipt, CheckoutError> {
  controller.sync_identity();
  let lines = controller.items().to_vec();
  if lines.is_empty() {
    return Err(CheckoutError::EmptyCart);
  }

  // Step 1: screen against the cached stock snapshots and surface every
  // violation at once.
  let violations: Vec<StockViolation> = lines
    .iter()
    .filter(|line| i64::from(line.quantity) > line.stock)
    .map(|line| StockViolation {
      product_id: line.product_id,
      title: line.title.clone(),
      available: line.stock,
      requested: line.quantity,
    })
    .collect();
  if !violations.is_empty() {
    info!(
      count = violations.len(),
      "checkout rejected by snapshot validation"
    );
    return Err(CheckoutError::Rejected(violations));
  }

  // Step 2: commit line by line, in cart insertion order. The guarded
  // decrement re-checks authoritative stock, not the snapshot, so a
  // concurrent purchase since add-time fails the line instead of
  // overselling.
  let mut committed: Vec<&LineItem> = Vec::new();
  for line in &lines {
    match catalog.try_decrement_stock(line.product_id, line.quantity).await {
      Ok(remaining) => {
        debug!(
          product_id = %line.product_id,
          quantity = line.quantity,
          remaining,
          "checkout: stock decremented"
        );
        committed.push(line);
      }
      Err(err) => {
        warn!(
          product_id = %line.product_id,
          error = %err,
          committed = committed.len(),
          "checkout: commit failed partway, compensating earlier lines"
        );
        for done in committed {
          if let Err(restore_err) = catalog.restore_stock(done.product_id, done.quantity).await {
            warn!(
              product_id = %done.product_id,
              error = %restore_err,
              "checkout: compensation failed, stock left decremented"
            );
          }
        }
        return Err(CheckoutError::Commit { source: err });
      }
    }
  }

  // Step 3: all lines committed; clear the cart (which also deletes its
  // persisted record) and hand back the receipt.
  let total_cents = lines.iter().map(LineItem::subtotal_cents).sum();
  controller.clear_cart();
  info!(lines = lines.len(), total_cents, "checkout committed");

  Ok(CheckoutReceipt {
    lines,
    total_cents,
    completed_at: Utc::now(),
    notice: Notice::order_placed(),
  })
}
