// server/src/services/sessions.rs

//! Session registry: one signed-in session per token, each owning its
//! identity hub and cart controller.
//!
//! Exactly one controller exists per bound identity per session; the cart
//! sits behind an async mutex because the checkout commit holds it across
//! remote store calls.

use std::collections::HashMap;
use std::sync::Arc;

use eshop::stores::KvStore;
use eshop::{CartController, Identity, IdentityHub};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct Session {
  pub token: Uuid,
  pub identity: Identity,
  pub hub: IdentityHub,
  pub cart: Mutex<CartController>,
}

#[derive(Default)]
pub struct SessionRegistry {
  sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

impl SessionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Opens a session for `identity`: signs its hub in and attaches a cart
  /// controller, which loads the identity's persisted cart.
  ///
  /// A new sign-in replaces the user's previous session, so the registry is
  /// bounded by the number of distinct signed-in users; abandoned tokens do
  /// not pile up.
  pub fn create(&self, identity: Identity, cart_store: Arc<dyn KvStore>) -> Arc<Session> {
    let token = Uuid::new_v4();
    let hub = IdentityHub::signed_in(identity);
    let cart = Mutex::new(CartController::attached(cart_store, hub.subscribe()));
    let session = Arc::new(Session {
      token,
      identity,
      hub,
      cart,
    });

    let mut sessions = self.sessions.write();
    sessions.retain(|stale_token, existing| {
      if existing.identity.user_id == identity.user_id {
        existing.hub.sign_out();
        tracing::debug!(user_id = %identity.user_id, token = %stale_token, "previous session evicted");
        false
      } else {
        true
      }
    });
    sessions.insert(token, session.clone());
    tracing::debug!(user_id = %identity.user_id, %token, "session opened");
    session
  }

  pub fn get(&self, token: Uuid) -> Option<Arc<Session>> {
    self.sessions.read().get(&token).cloned()
  }

  /// Signs the session's hub out and drops the session. The user's
  /// persisted cart record is detached, not deleted.
  pub fn remove(&self, token: Uuid) -> bool {
    let removed = self.sessions.write().remove(&token);
    if let Some(session) = removed {
      session.hub.sign_out();
      tracing::debug!(%token, "session closed");
      true
    } else {
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use eshop::cart::cart_key;
  use eshop::models::Role;
  use eshop::stores::MemoryKvStore;

  #[tokio::test]
  async fn session_cart_loads_persisted_record_and_survives_signout() {
    let store = Arc::new(MemoryKvStore::new());
    let identity = Identity {
      user_id: Uuid::new_v4(),
      role: Role::Customer,
    };
    store
      .set(
        &cart_key(identity.user_id),
        r#"[{"product_id":"6f2a9e1c-0b4d-4a5b-9a44-aa4a86f0a001","title":"Keyboard","brand":"KeyCo","price_cents":4999,"stock":5,"quantity":2}]"#,
      )
      .unwrap();

    let registry = SessionRegistry::new();
    let session = registry.create(identity, store.clone());
    {
      let cart = session.cart.lock().await;
      assert_eq!(cart.item_count(), 2);
    }

    assert!(registry.remove(session.token));
    assert!(registry.get(session.token).is_none());
    // Sign-out detaches the record without deleting it.
    assert!(store.get(&cart_key(identity.user_id)).unwrap().is_some());
  }

  #[tokio::test]
  async fn new_signin_replaces_the_users_previous_session() {
    let store = Arc::new(MemoryKvStore::new());
    let identity = Identity {
      user_id: Uuid::new_v4(),
      role: Role::Customer,
    };

    let registry = SessionRegistry::new();
    let first = registry.create(identity, store.clone());
    let second = registry.create(identity, store.clone());

    // The stale token is gone and its hub is signed out; only the fresh
    // session remains.
    assert!(registry.get(first.token).is_none());
    assert!(first.hub.current().is_none());
    assert!(registry.get(second.token).is_some());

    // Sessions of other users are untouched.
    let other = registry.create(
      Identity {
        user_id: Uuid::new_v4(),
        role: Role::Customer,
      },
      store.clone(),
    );
    assert!(registry.get(second.token).is_some());
    assert!(registry.get(other.token).is_some());
  }

  #[tokio::test]
  async fn unknown_token_is_not_a_session() {
    let registry = SessionRegistry::new();
    assert!(registry.get(Uuid::new_v4()).is_none());
    assert!(!registry.remove(Uuid::new_v4()));
  }
}
