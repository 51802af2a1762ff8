// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product as stored in the remote catalog.
///
/// Prices are in minor currency units (cents). `stock` is the authoritative
/// remaining quantity; copies of it on cart line items are display snapshots
/// only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub title: String,
  pub category: String,
  pub brand: String,
  pub description: String,
  pub image_url: String,
  pub price_cents: i64,
  pub stock: i64,
  pub vendor_id: Uuid,
  pub created_at: DateTime<Utc>,
}

/// Vendor-submitted product fields, before an id and timestamps exist.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub title: String,
  pub category: String,
  pub brand: String,
  pub description: String,
  pub image_url: String,
  pub price_cents: i64,
  pub stock: i64,
}

impl NewProduct {
  /// Validates the form fields, returning the first failure as a
  /// displayable message.
  pub fn validate(&self) -> Result<(), String> {
    if self.title.trim().is_empty() {
      return Err("Product title is required.".to_string());
    }
    if self.category.trim().is_empty() {
      return Err("Category is required.".to_string());
    }
    if self.brand.trim().is_empty() {
      return Err("Brand is required.".to_string());
    }
    if self.price_cents <= 0 {
      return Err("Valid price is required.".to_string());
    }
    if self.stock < 0 {
      return Err("Valid stock is required.".to_string());
    }
    if self.description.trim().is_empty() {
      return Err("Description is required.".to_string());
    }
    if self.image_url.trim().is_empty() {
      return Err("Image URL is required.".to_string());
    }
    Ok(())
  }

  /// Materializes the submission into a `Product` owned by `vendor_id`.
  pub fn into_product(self, vendor_id: Uuid) -> Product {
    Product {
      id: Uuid::new_v4(),
      title: self.title,
      category: self.category,
      brand: self.brand,
      description: self.description,
      image_url: self.image_url,
      price_cents: self.price_cents,
      stock: self.stock,
      vendor_id,
      created_at: Utc::now(),
    }
  }
}
