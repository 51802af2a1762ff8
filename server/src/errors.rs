// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use eshop::{CheckoutError, StockViolation, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Access Denied: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Checkout pre-validation failed; carries one message per over-limit
  /// line item.
  #[error("Checkout rejected: {} item(s) exceed available stock.", .0.len())]
  CheckoutRejected(Vec<StockViolation>),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<CheckoutError> for AppError {
  fn from(err: CheckoutError) -> Self {
    match err {
      CheckoutError::EmptyCart => AppError::Validation("Cart is empty.".to_string()),
      CheckoutError::Rejected(violations) => AppError::CheckoutRejected(violations),
      // A mid-commit failure is deliberately generic to the caller; the
      // details are in the logs.
      CheckoutError::Commit { source } => {
        tracing::error!(error = %source, "checkout commit failed");
        AppError::Internal("Checkout could not be completed. Please try again.".to_string())
      }
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for
// convenience in handlers using `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::Forbidden(m) => HttpResponse::Forbidden().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::CheckoutRejected(violations) => {
        // Per-item messages keyed by product id, for the cart review screen.
        let mut per_item = serde_json::Map::new();
        for v in violations {
          per_item.insert(v.product_id.to_string(), json!(v.message()));
        }
        HttpResponse::Conflict().json(json!({
          "error": "Some items exceed the available stock.",
          "violations": per_item,
        }))
      }
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Store(err) => match err {
        StoreError::NotFound(what) => HttpResponse::NotFound().json(json!({"error": format!("{what} not found")})),
        StoreError::DuplicateEmail(_) => {
          HttpResponse::Conflict().json(json!({"error": "An account with this email already exists."}))
        }
        StoreError::InsufficientStock { available } => HttpResponse::Conflict()
          .json(json!({"error": format!("Insufficient stock. Only {available} available.")})),
        StoreError::Backend { .. } => {
          HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"}))
        }
      },
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
