// server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use eshop::commit_checkout;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionUser;

#[instrument(
    name = "handler::checkout",
    skip(app_state, session_user),
    fields(user_id = %session_user.0.identity.user_id)
)]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  // The cart stays locked across the whole commit so no cart mutation can
  // interleave with the stock decrements.
  let mut cart = session_user.0.cart.lock().await;
  let receipt = commit_checkout(&mut cart, app_state.catalog.as_ref()).await?;

  info!(
    total_cents = receipt.total_cents,
    lines = receipt.lines.len(),
    "checkout completed"
  );

  Ok(HttpResponse::Ok().json(json!({
      "message": receipt.notice.message,
      "noticeExpiresAt": receipt.notice.expires_at,
      "completedAt": receipt.completed_at,
      "totalCents": receipt.total_cents,
      "lines": receipt.lines,
  })))
}
