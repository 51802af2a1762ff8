// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::Arc;

use chrono::Utc;
use eshop::identity::{Identity, IdentityHub};
use eshop::models::{Product, Role};
use eshop::stores::{KvStore, MemoryKvStore, StoreError};
use eshop::CartController;
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub fn product(title: &str, price_cents: i64, stock: i64) -> Product {
  Product {
    id: Uuid::new_v4(),
    title: title.to_string(),
    category: "Electronics".to_string(),
    brand: "Acme".to_string(),
    description: format!("{title} description"),
    image_url: format!("https://img.example/{title}.png"),
    price_cents,
    stock,
    vendor_id: Uuid::new_v4(),
    created_at: Utc::now(),
  }
}

pub fn customer(user_id: Uuid) -> Identity {
  Identity {
    user_id,
    role: Role::Customer,
  }
}

/// A hub already signed in as `user_id` plus a controller attached to it.
pub fn signed_in_controller(store: Arc<MemoryKvStore>, user_id: Uuid) -> (IdentityHub, CartController) {
  let hub = IdentityHub::signed_in(customer(user_id));
  let controller = CartController::attached(store, hub.subscribe());
  (hub, controller)
}

// --- A key-value store whose writes always fail ---

#[derive(Debug, Default)]
pub struct FailingKvStore;

impl KvStore for FailingKvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Err(StoreError::Backend {
      source: anyhow::anyhow!("get({key}) refused: store offline"),
    })
  }

  fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
    Err(StoreError::Backend {
      source: anyhow::anyhow!("set({key}) refused: store offline"),
    })
  }

  fn delete(&self, key: &str) -> Result<(), StoreError> {
    Err(StoreError::Backend {
      source: anyhow::anyhow!("delete({key}) refused: store offline"),
    })
  }
}
