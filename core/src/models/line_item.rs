// core/src/models/line_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// One product entry in a cart.
///
/// `title`, `brand`, `price_cents` and `stock` are display snapshots copied
/// from the catalog when the line was first added; they are never refreshed
/// by later cart operations. `quantity` is the only field the reducer
/// mutates after creation and is always >= 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub product_id: Uuid,
  pub title: String,
  pub brand: String,
  pub price_cents: i64,
  pub stock: i64,
  pub quantity: u32,
}

impl LineItem {
  /// A fresh line for `product` with quantity 1, snapshotting its display
  /// fields.
  pub fn from_product(product: &Product) -> Self {
    Self {
      product_id: product.id,
      title: product.title.clone(),
      brand: product.brand.clone(),
      price_cents: product.price_cents,
      stock: product.stock,
      quantity: 1,
    }
  }

  pub fn subtotal_cents(&self) -> i64 {
    self.price_cents * i64::from(self.quantity)
  }
}
