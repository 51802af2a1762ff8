// server/src/state.rs
use std::sync::Arc;

use eshop::stores::{CatalogStore, KvStore, UserStore};

use crate::config::AppConfig;
use crate::services::sessions::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<dyn CatalogStore>,
  pub users: Arc<dyn UserStore>,
  /// Durable store for persisted per-user cart records.
  pub cart_store: Arc<dyn KvStore>,
  pub sessions: Arc<SessionRegistry>,
  pub config: Arc<AppConfig>,
}
