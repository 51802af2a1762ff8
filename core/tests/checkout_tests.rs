// tests/checkout_tests.rs
mod common;

use std::sync::Arc;

use common::*;
use eshop::cart::cart_key;
use eshop::stores::{CatalogStore, KvStore, MemoryCatalog, MemoryKvStore};
use eshop::{commit_checkout, CheckoutError};
use uuid::Uuid;

#[tokio::test]
async fn test_checkout_gate_rejects_quantity_over_snapshot_stock() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let user_id = Uuid::new_v4();
  let (_hub, mut controller) = signed_in_controller(store.clone(), user_id);

  let p = product("monitor", 19_900, 3);
  let catalog = MemoryCatalog::with_products(vec![p.clone()]);
  controller.add_to_cart(&p);
  controller.set_quantity(p.id, 5); // requested 5, snapshot stock 3

  let result = commit_checkout(&mut controller, &catalog).await;

  match result {
    Err(CheckoutError::Rejected(violations)) => {
      assert_eq!(violations.len(), 1);
      assert_eq!(violations[0].product_id, p.id);
      assert_eq!(violations[0].available, 3);
      assert_eq!(violations[0].requested, 5);
      assert!(violations[0].message().contains("monitor"));
    }
    other => panic!("expected Rejected, got {other:?}"),
  }

  // Remote stock untouched, cart untouched, record still persisted.
  assert_eq!(catalog.stock_of(p.id).await.unwrap(), 3);
  assert_eq!(controller.items().len(), 1);
  assert!(store.get(&cart_key(user_id)).unwrap().is_some());
}

#[tokio::test]
async fn test_checkout_success_decrements_stock_and_clears_cart() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let user_id = Uuid::new_v4();
  let (_hub, mut controller) = signed_in_controller(store.clone(), user_id);

  let p = product("keyboard", 4_999, 10);
  let catalog = MemoryCatalog::with_products(vec![p.clone()]);
  controller.add_to_cart(&p);
  controller.increment(p.id); // quantity 2

  let receipt = commit_checkout(&mut controller, &catalog).await.unwrap();

  assert_eq!(catalog.stock_of(p.id).await.unwrap(), 8);
  assert!(controller.is_empty());
  assert_eq!(store.get(&cart_key(user_id)).unwrap(), None);
  assert_eq!(receipt.total_cents, 9_998);
  assert_eq!(receipt.lines.len(), 1);
  assert!(receipt.notice.expires_at > receipt.completed_at);
}

#[tokio::test]
async fn test_checkout_of_empty_cart_fails() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let (_hub, mut controller) = signed_in_controller(store, Uuid::new_v4());
  let catalog = MemoryCatalog::new();

  let result = commit_checkout(&mut controller, &catalog).await;
  assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn test_commit_failure_partway_compensates_earlier_lines() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let user_id = Uuid::new_v4();
  let (_hub, mut controller) = signed_in_controller(store.clone(), user_id);

  let a = product("first", 1_000, 10);
  let b = product("second", 2_000, 10);
  // Only `a` exists remotely; committing `b` fails after `a` was decremented.
  let catalog = MemoryCatalog::with_products(vec![a.clone()]);

  controller.add_to_cart(&a);
  controller.add_to_cart(&b);

  let result = commit_checkout(&mut controller, &catalog).await;
  assert!(matches!(result, Err(CheckoutError::Commit { .. })));

  // `a`'s decrement was rolled back; the cart and its record survive.
  assert_eq!(catalog.stock_of(a.id).await.unwrap(), 10);
  assert_eq!(controller.items().len(), 2);
  assert!(store.get(&cart_key(user_id)).unwrap().is_some());
}

#[tokio::test]
async fn test_commit_recheck_catches_concurrent_purchases() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let (_hub, mut controller) = signed_in_controller(store, Uuid::new_v4());

  let p = product("last-one", 7_500, 5);
  let catalog = MemoryCatalog::with_products(vec![p.clone()]);
  controller.add_to_cart(&p);
  controller.set_quantity(p.id, 5); // fine against the snapshot (5)

  // Another user buys 3 units between add-time and commit-time.
  catalog.try_decrement_stock(p.id, 3).await.unwrap();

  let result = commit_checkout(&mut controller, &catalog).await;
  assert!(matches!(result, Err(CheckoutError::Commit { .. })));

  // The guarded decrement refused to oversell: live stock still 2.
  assert_eq!(catalog.stock_of(p.id).await.unwrap(), 2);
  assert_eq!(controller.items().len(), 1);
}

#[tokio::test]
async fn test_checkout_commits_lines_in_insertion_order() {
  setup_tracing();
  let store = Arc::new(MemoryKvStore::new());
  let (_hub, mut controller) = signed_in_controller(store, Uuid::new_v4());

  let a = product("a", 100, 4);
  let b = product("b", 200, 4);
  let c = product("c", 300, 4);
  let catalog = MemoryCatalog::with_products(vec![a.clone(), b.clone(), c.clone()]);
  for p in [&a, &b, &c] {
    controller.add_to_cart(p);
  }

  let receipt = commit_checkout(&mut controller, &catalog).await.unwrap();
  let committed: Vec<Uuid> = receipt.lines.iter().map(|l| l.product_id).collect();
  assert_eq!(committed, vec![a.id, b.id, c.id]);
  for p in [&a, &b, &c] {
    assert_eq!(catalog.stock_of(p.id).await.unwrap(), 3);
  }
}
