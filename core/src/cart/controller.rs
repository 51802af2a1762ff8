// core/src/cart/controller.rs

//! Owns the in-memory cart, binds it to the current identity, and bridges
//! every state transition to durable storage.
//!
//! One controller exists per session. It is the exclusive owner of the
//! cart and the sole writer of its persisted record; the checkout
//! committer only reads the cart and issues a clear on success.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::reducer::{apply, CartOp};
use crate::identity::{Identity, IdentityWatch};
use crate::models::{LineItem, Product};
use crate::stores::KvStore;

/// Persistence key for a user's cart record.
pub fn cart_key(user_id: Uuid) -> String {
  format!("cart_{user_id}")
}

pub struct CartController {
  store: Arc<dyn KvStore>,
  watch: Option<IdentityWatch>,
  identity: Option<Identity>,
  items: Vec<LineItem>,
}

impl CartController {
  /// A controller with no identity bound. The cart stays in memory only
  /// until an identity arrives.
  pub fn new(store: Arc<dyn KvStore>) -> Self {
    Self {
      store,
      watch: None,
      identity: None,
      items: Vec::new(),
    }
  }

  /// A controller subscribed to `watch`. The identity current at attach
  /// time is bound immediately; later changes are picked up before each
  /// operation.
  pub fn attached(store: Arc<dyn KvStore>, watch: IdentityWatch) -> Self {
    let mut controller = Self::new(store);
    controller.watch = Some(watch);
    controller.sync_identity();
    controller
  }

  /// Drains pending identity changes and rebinds if the identity moved.
  ///
  /// An identity change never merges or carries over the previous cart:
  /// the new identity's persisted record (or empty) replaces it wholesale.
  pub fn sync_identity(&mut self) {
    let Some(watch) = self.watch.as_mut() else {
      return;
    };
    let current = *watch.borrow_and_update();
    if current.map(|i| i.user_id) != self.identity.map(|i| i.user_id) {
      self.bind(current);
    }
  }

  fn bind(&mut self, identity: Option<Identity>) {
    self.identity = identity;
    match identity {
      None => {
        // No identity: cart forced empty, no persistence reads or writes.
        debug!("cart controller: identity unbound, cart detached");
        self.items = apply(&self.items, &CartOp::Init(Vec::new()));
      }
      Some(identity) => {
        let loaded = self.load_persisted(identity.user_id);
        debug!(
          user_id = %identity.user_id,
          lines = loaded.len(),
          "cart controller: identity bound, persisted cart loaded"
        );
        self.dispatch(CartOp::Init(loaded));
      }
    }
  }

  /// Reads the persisted record for `user_id`. A missing or malformed
  /// record is an empty cart, never an error.
  fn load_persisted(&self, user_id: Uuid) -> Vec<LineItem> {
    let key = cart_key(user_id);
    match self.store.get(&key) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(items) => items,
        Err(err) => {
          warn!(%key, error = %err, "cart controller: malformed persisted cart, treating as empty");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(err) => {
        warn!(%key, error = %err, "cart controller: persisted cart unreadable, treating as empty");
        Vec::new()
      }
    }
  }

  fn dispatch(&mut self, op: CartOp) {
    self.items = apply(&self.items, &op);
    self.persist();
  }

  /// Writes the full current cart under the bound identity's key, or
  /// deletes the record when the cart is empty. Best-effort: storage
  /// failures are logged and swallowed.
  fn persist(&self) {
    let Some(identity) = self.identity else {
      return;
    };
    let key = cart_key(identity.user_id);
    let result = if self.items.is_empty() {
      self.store.delete(&key)
    } else {
      match serde_json::to_string(&self.items) {
        Ok(raw) => self.store.set(&key, &raw),
        Err(err) => {
          warn!(%key, error = %err, "cart controller: failed to encode cart record");
          return;
        }
      }
    };
    if let Err(err) = result {
      warn!(%key, error = %err, "cart controller: failed to persist cart record");
    }
  }

  // --- Public mutation operations ---

  pub fn add_to_cart(&mut self, product: &Product) {
    self.sync_identity();
    self.dispatch(CartOp::Add(product.clone()));
  }

  pub fn remove_from_cart(&mut self, product_id: Uuid) {
    self.sync_identity();
    self.dispatch(CartOp::Remove(product_id));
  }

  pub fn increment(&mut self, product_id: Uuid) {
    self.sync_identity();
    self.dispatch(CartOp::Increment(product_id));
  }

  pub fn decrement(&mut self, product_id: Uuid) {
    self.sync_identity();
    self.dispatch(CartOp::Decrement(product_id));
  }

  /// Sets a line's quantity, clamped to at least 1.
  pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) {
    self.sync_identity();
    self.dispatch(CartOp::SetQuantity(product_id, quantity.max(1)));
  }

  pub fn clear_cart(&mut self) {
    self.sync_identity();
    self.dispatch(CartOp::Clear);
  }

  // --- Snapshot reads ---

  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Total number of units across all lines (the cart badge count).
  /// Saturates at `u32::MAX` rather than wrapping.
  pub fn item_count(&self) -> u32 {
    self
      .items
      .iter()
      .fold(0u32, |count, item| count.saturating_add(item.quantity))
  }

  pub fn total_cents(&self) -> i64 {
    self.items.iter().map(LineItem::subtotal_cents).sum()
  }

  pub fn current_identity(&self) -> Option<Identity> {
    self.identity
  }
}
