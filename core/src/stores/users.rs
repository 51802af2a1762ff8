// core/src/stores/users.rs

//! The user directory behind the authentication service.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::models::User;

#[async_trait]
pub trait UserStore: Send + Sync {
  /// Stores a new user. Emails are unique.
  async fn insert_user(&self, user: User) -> Result<(), StoreError>;

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

  async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
  users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserStore for MemoryUserStore {
  async fn insert_user(&self, user: User) -> Result<(), StoreError> {
    let mut users = self.users.write();
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
      return Err(StoreError::DuplicateEmail(user.email));
    }
    users.push(user);
    Ok(())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
    Ok(
      self
        .users
        .read()
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .cloned(),
    )
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
    Ok(self.users.read().iter().find(|u| u.id == id).cloned())
  }
}
