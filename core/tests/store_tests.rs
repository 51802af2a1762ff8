// tests/store_tests.rs
mod common;

use std::sync::Arc;

use chrono::Utc;
use common::*;
use eshop::models::{Role, User};
use eshop::stores::{CatalogStore, FileKvStore, KvStore, MemoryCatalog, MemoryUserStore, StoreError, UserStore};
use serial_test::serial;
use uuid::Uuid;

#[test]
#[serial]
fn test_file_kv_store_roundtrip() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let store = FileKvStore::open(dir.path()).unwrap();

  assert_eq!(store.get("cart_missing").unwrap(), None);

  store.set("cart_abc", r#"[{"n":1}]"#).unwrap();
  assert_eq!(store.get("cart_abc").unwrap().as_deref(), Some(r#"[{"n":1}]"#));

  store.set("cart_abc", "[]").unwrap();
  assert_eq!(store.get("cart_abc").unwrap().as_deref(), Some("[]"));

  store.delete("cart_abc").unwrap();
  assert_eq!(store.get("cart_abc").unwrap(), None);

  // Deleting an absent key is not an error.
  store.delete("cart_abc").unwrap();
}

#[test]
#[serial]
fn test_file_kv_store_survives_reopen() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  {
    let store = FileKvStore::open(dir.path()).unwrap();
    store.set("cart_persist", "42").unwrap();
  }
  let reopened = FileKvStore::open(dir.path()).unwrap();
  assert_eq!(reopened.get("cart_persist").unwrap().as_deref(), Some("42"));
}

#[tokio::test]
async fn test_guarded_decrement_refuses_oversell() {
  setup_tracing();
  let p = product("widget", 1_000, 4);
  let catalog = MemoryCatalog::with_products(vec![p.clone()]);

  let err = catalog.try_decrement_stock(p.id, 5).await.unwrap_err();
  match err {
    StoreError::InsufficientStock { available } => assert_eq!(available, 4),
    other => panic!("expected InsufficientStock, got {other:?}"),
  }
  // Refusal leaves stock untouched.
  assert_eq!(catalog.stock_of(p.id).await.unwrap(), 4);

  // Decrementing to exactly zero is allowed; below zero never happens.
  assert_eq!(catalog.try_decrement_stock(p.id, 4).await.unwrap(), 0);
  assert!(catalog.try_decrement_stock(p.id, 1).await.is_err());
}

#[tokio::test]
async fn test_restore_stock_compensates() {
  setup_tracing();
  let p = product("widget", 1_000, 10);
  let catalog = MemoryCatalog::with_products(vec![p.clone()]);

  catalog.try_decrement_stock(p.id, 6).await.unwrap();
  assert_eq!(catalog.restore_stock(p.id, 6).await.unwrap(), 10);
}

#[tokio::test]
async fn test_concurrent_decrements_never_oversell() {
  setup_tracing();
  let p = product("scarce", 1_000, 10);
  let catalog = Arc::new(MemoryCatalog::with_products(vec![p.clone()]));

  let mut handles = Vec::new();
  for _ in 0..25 {
    let catalog = catalog.clone();
    let id = p.id;
    handles.push(tokio::spawn(async move {
      catalog.try_decrement_stock(id, 1).await.is_ok()
    }));
  }

  let mut successes = 0;
  for handle in handles {
    if handle.await.unwrap() {
      successes += 1;
    }
  }

  // Exactly the available units were sold, no more.
  assert_eq!(successes, 10);
  assert_eq!(catalog.stock_of(p.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_product_requires_existing_record() {
  setup_tracing();
  let catalog = MemoryCatalog::new();
  let p = product("ghost", 1_000, 1);

  assert!(matches!(
    catalog.update_product(p.clone()).await,
    Err(StoreError::NotFound(_))
  ));

  catalog.insert_product(p.clone()).await.unwrap();
  let mut updated = p.clone();
  updated.price_cents = 2_000;
  catalog.update_product(updated).await.unwrap();
  assert_eq!(catalog.get_product(p.id).await.unwrap().unwrap().price_cents, 2_000);
}

#[tokio::test]
async fn test_products_by_vendor_filters_ownership() {
  setup_tracing();
  let mut mine = product("mine", 1_000, 1);
  let vendor_id = Uuid::new_v4();
  mine.vendor_id = vendor_id;
  let theirs = product("theirs", 2_000, 1);
  let catalog = MemoryCatalog::with_products(vec![mine.clone(), theirs]);

  let listed = catalog.products_by_vendor(vendor_id).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, mine.id);
}

#[test]
fn test_serialized_user_never_exposes_the_password_hash() {
  setup_tracing();
  let user = User {
    id: Uuid::new_v4(),
    email: "shopper@example.com".to_string(),
    password_hash: "$argon2id$mock".to_string(),
    role: Role::Customer,
    created_at: Utc::now(),
  };

  let encoded = serde_json::to_value(&user).unwrap();
  assert!(encoded.get("password_hash").is_none());
  assert_eq!(encoded["email"], "shopper@example.com");
}

#[tokio::test]
async fn test_user_store_rejects_duplicate_email() {
  setup_tracing();
  let users = MemoryUserStore::new();
  let user = User {
    id: Uuid::new_v4(),
    email: "shopper@example.com".to_string(),
    password_hash: "$argon2id$mock".to_string(),
    role: Role::Customer,
    created_at: Utc::now(),
  };
  users.insert_user(user.clone()).await.unwrap();

  let mut dup = user.clone();
  dup.id = Uuid::new_v4();
  dup.email = "Shopper@Example.com".to_string(); // case-insensitive match
  assert!(matches!(
    users.insert_user(dup).await,
    Err(StoreError::DuplicateEmail(_))
  ));

  let found = users.find_by_email("SHOPPER@example.com").await.unwrap();
  assert_eq!(found.unwrap().id, user.id);
}
