// core/src/identity.rs

//! The current-identity-or-none stream supplied by the authentication
//! provider.
//!
//! A subscriber observes the state that is current at subscription time and
//! every change thereafter, in order. `IdentityHub` is the producer side
//! (one per session); `IdentityWatch` is handed to consumers such as
//! `CartController`.

use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::Role;

/// An authenticated user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
  pub user_id: Uuid,
  pub role: Role,
}

/// Producer side of the identity stream.
#[derive(Debug)]
pub struct IdentityHub {
  sender: watch::Sender<Option<Identity>>,
}

/// Consumer side of the identity stream.
pub type IdentityWatch = watch::Receiver<Option<Identity>>;

impl IdentityHub {
  /// A hub with no identity bound.
  pub fn new() -> Self {
    let (sender, _) = watch::channel(None);
    Self { sender }
  }

  /// A hub already bound to `identity`.
  pub fn signed_in(identity: Identity) -> Self {
    let (sender, _) = watch::channel(Some(identity));
    Self { sender }
  }

  pub fn sign_in(&self, identity: Identity) {
    tracing::debug!(user_id = %identity.user_id, "identity hub: sign-in");
    self.sender.send_replace(Some(identity));
  }

  pub fn sign_out(&self) {
    tracing::debug!("identity hub: sign-out");
    self.sender.send_replace(None);
  }

  pub fn current(&self) -> Option<Identity> {
    *self.sender.borrow()
  }

  pub fn subscribe(&self) -> IdentityWatch {
    self.sender.subscribe()
  }
}

impl Default for IdentityHub {
  fn default() -> Self {
    Self::new()
  }
}
