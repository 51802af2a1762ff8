// server/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::sessions::SessionRegistry;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use eshop::stores::{FileKvStore, KvStore, MemoryCatalog, MemoryUserStore};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Cart records live on disk so carts survive restarts; catalog and users
  // are in-memory stores.
  let cart_store: Arc<dyn KvStore> = match FileKvStore::open(&app_config.cart_data_dir) {
    Ok(store) => {
      tracing::info!(dir = %app_config.cart_data_dir, "cart store opened");
      Arc::new(store)
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to open the cart data directory.");
      panic!("Cart store error: {}", e);
    }
  };
  let catalog = Arc::new(MemoryCatalog::new());
  let users = Arc::new(MemoryUserStore::new());

  // Seed the demo catalog if configured
  if app_config.seed_catalog {
    if let Err(e) = services::seed::seed_catalog(catalog.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed the demo catalog.");
    }
  }

  // Create AppState
  let app_state = AppState {
    catalog,
    users,
    cart_store,
    sessions: Arc::new(SessionRegistry::new()),
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
