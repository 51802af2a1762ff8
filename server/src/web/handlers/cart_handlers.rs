// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use eshop::CartController;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::SessionUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct CartItemRequestPayload {
  pub product_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct SetQuantityRequestPayload {
  pub product_id: Uuid,
  pub quantity: u32,
}

/// Renders the cart for the client. Line items carry their add-time price
/// and stock snapshot; the view is enriched with the live catalog values so
/// the review screen can show both.
async fn cart_view(app_state: &AppState, cart: &CartController) -> Result<serde_json::Value, AppError> {
  let mut lines = Vec::with_capacity(cart.items().len());
  for item in cart.items() {
    let live = app_state.catalog.get_product(item.product_id).await?;
    lines.push(json!({
        "productId": item.product_id.to_string(),
        "title": item.title,
        "brand": item.brand,
        "quantity": item.quantity,
        "priceCents": item.price_cents,
        "subtotalCents": item.subtotal_cents(),
        "livePriceCents": live.as_ref().map(|p| p.price_cents),
        "liveStock": live.as_ref().map(|p| p.stock),
    }));
  }
  Ok(json!({
      "items": lines,
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  }))
}

// --- Handler Implementations ---

#[instrument(name = "handler::view_cart", skip(app_state, session_user), fields(user_id = %session_user.0.identity.user_id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.sync_identity();
  let view = cart_view(&app_state, &cart).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CartItemRequestPayload>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .catalog
    .get_product(req_payload.product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {}", req_payload.product_id)))?;

  let mut cart = session_user.0.cart.lock().await;
  cart.add_to_cart(&product);

  info!(item_count = cart.item_count(), "item added to cart");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart successfully.",
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %req_payload.product_id)
)]
pub async fn remove_from_cart_handler(
  req_payload: web::Json<CartItemRequestPayload>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.remove_from_cart(req_payload.product_id);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item removed from cart.",
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })))
}

#[instrument(
    name = "handler::increment_cart_item",
    skip(req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %req_payload.product_id)
)]
pub async fn increment_handler(
  req_payload: web::Json<CartItemRequestPayload>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.increment(req_payload.product_id);

  Ok(HttpResponse::Ok().json(json!({
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })))
}

#[instrument(
    name = "handler::decrement_cart_item",
    skip(req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %req_payload.product_id)
)]
pub async fn decrement_handler(
  req_payload: web::Json<CartItemRequestPayload>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.decrement(req_payload.product_id);

  Ok(HttpResponse::Ok().json(json!({
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })))
}

#[instrument(
    name = "handler::set_cart_quantity",
    skip(req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn set_quantity_handler(
  req_payload: web::Json<SetQuantityRequestPayload>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.set_quantity(req_payload.product_id, req_payload.quantity);

  Ok(HttpResponse::Ok().json(json!({
      "itemCount": cart.item_count(),
      "totalCents": cart.total_cents(),
  })))
}

#[instrument(name = "handler::clear_cart", skip(session_user), fields(user_id = %session_user.0.identity.user_id))]
pub async fn clear_cart_handler(session_user: SessionUser) -> Result<HttpResponse, AppError> {
  let mut cart = session_user.0.cart.lock().await;
  cart.clear_cart();

  Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared." })))
}
