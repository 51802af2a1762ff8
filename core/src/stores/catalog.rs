// core/src/stores/catalog.rs

//! The remote product catalog.
//!
//! `try_decrement_stock` is the commit primitive for checkout: it re-checks
//! live stock and decrements in one guarded operation, so two concurrent
//! checkouts cannot both succeed against the same units. There is no
//! multi-item batch primitive; each line item is committed independently.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::models::Product;

#[async_trait]
pub trait CatalogStore: Send + Sync {
  /// Every product in the catalog, in insertion order.
  async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

  async fn insert_product(&self, product: Product) -> Result<(), StoreError>;

  /// Replaces the stored product with the same id.
  async fn update_product(&self, product: Product) -> Result<(), StoreError>;

  async fn products_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Product>, StoreError>;

  /// Current authoritative stock for `id`.
  async fn stock_of(&self, id: Uuid) -> Result<i64, StoreError>;

  /// Atomically decrements stock by `quantity` if at least that much
  /// remains, returning the new stock. Fails with
  /// [`StoreError::InsufficientStock`] otherwise; stock never goes
  /// negative.
  async fn try_decrement_stock(&self, id: Uuid, quantity: u32) -> Result<i64, StoreError>;

  /// Adds `quantity` back to stock, returning the new stock. Used to
  /// compensate a partially failed checkout commit.
  async fn restore_stock(&self, id: Uuid, quantity: u32) -> Result<i64, StoreError>;
}

/// In-memory catalog standing in for the managed document database.
///
/// All mutation happens under one write lock, which is what makes
/// `try_decrement_stock` atomic with respect to concurrent checkouts.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
  products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: Vec<Product>) -> Self {
    Self {
      products: RwLock::new(products),
    }
  }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
  async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
    Ok(self.products.read().clone())
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
    Ok(self.products.read().iter().find(|p| p.id == id).cloned())
  }

  async fn insert_product(&self, product: Product) -> Result<(), StoreError> {
    self.products.write().push(product);
    Ok(())
  }

  async fn update_product(&self, product: Product) -> Result<(), StoreError> {
    let mut products = self.products.write();
    match products.iter_mut().find(|p| p.id == product.id) {
      Some(slot) => {
        *slot = product;
        Ok(())
      }
      None => Err(StoreError::NotFound(format!("product {}", product.id))),
    }
  }

  async fn products_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Product>, StoreError> {
    Ok(
      self
        .products
        .read()
        .iter()
        .filter(|p| p.vendor_id == vendor_id)
        .cloned()
        .collect(),
    )
  }

  async fn stock_of(&self, id: Uuid) -> Result<i64, StoreError> {
    self
      .products
      .read()
      .iter()
      .find(|p| p.id == id)
      .map(|p| p.stock)
      .ok_or_else(|| StoreError::NotFound(format!("product {id}")))
  }

  async fn try_decrement_stock(&self, id: Uuid, quantity: u32) -> Result<i64, StoreError> {
    let mut products = self.products.write();
    let product = products
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("product {id}")))?;
    let requested = i64::from(quantity);
    if product.stock < requested {
      return Err(StoreError::InsufficientStock {
        available: product.stock,
      });
    }
    product.stock -= requested;
    Ok(product.stock)
  }

  async fn restore_stock(&self, id: Uuid, quantity: u32) -> Result<i64, StoreError> {
    let mut products = self.products.write();
    let product = products
      .iter_mut()
      .find(|p| p.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("product {id}")))?;
    product.stock += i64::from(quantity);
    Ok(product.stock)
  }
}
