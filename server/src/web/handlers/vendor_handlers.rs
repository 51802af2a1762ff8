// server/src/web/handlers/vendor_handlers.rs

use actix_web::{web, HttpResponse};
use eshop::models::{NewProduct, Product, Role};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::browse::{self, SortBy, SortOrder};
use crate::state::AppState;
use crate::web::extractors::SessionUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug, Default)]
pub struct VendorTableQuery {
  pub category: Option<String>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
  pub page: Option<usize>,
}

/// Every vendor route starts here; customers get a 403.
fn require_vendor(session_user: &SessionUser) -> Result<Uuid, AppError> {
  let identity = session_user.0.identity;
  if identity.role == Role::Vendor {
    Ok(identity.user_id)
  } else {
    warn!(user_id = %identity.user_id, "vendor route rejected for non-vendor account");
    Err(AppError::Forbidden("Vendor account required.".to_string()))
  }
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::vendor_add_product",
    skip(app_state, req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id)
)]
pub async fn add_product_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<NewProduct>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let vendor_id = require_vendor(&session_user)?;

  let payload = req_payload.into_inner();
  payload.validate().map_err(AppError::Validation)?;

  let product = payload.into_product(vendor_id);
  app_state.catalog.insert_product(product.clone()).await?;

  info!(product_id = %product.id, "product created");

  Ok(HttpResponse::Created().json(json!({
      "message": "Product saved successfully!",
      "product": product,
  })))
}

#[instrument(
    name = "handler::vendor_list_products",
    skip(app_state, query, session_user),
    fields(user_id = %session_user.0.identity.user_id)
)]
pub async fn list_my_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<VendorTableQuery>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let vendor_id = require_vendor(&session_user)?;

  let sort_by = match query.sort_by.as_deref() {
    Some("price") => SortBy::Price,
    // "stock" is the table's default column.
    _ => SortBy::Stock,
  };
  let sort_order = match query.sort_order.as_deref() {
    Some("desc") => SortOrder::Desc,
    _ => SortOrder::Asc,
  };

  let mine = app_state.catalog.products_by_vendor(vendor_id).await?;
  let categories = browse::categories(&mine);
  let page = browse::vendor_table(
    mine,
    query.category.as_deref(),
    sort_by,
    sort_order,
    query.page.unwrap_or(1),
  );

  Ok(HttpResponse::Ok().json(json!({
      "products": page.products,
      "page": page.page,
      "totalPages": page.total_pages,
      "categories": categories,
  })))
}

#[instrument(
    name = "handler::vendor_update_product",
    skip(app_state, req_payload, session_user),
    fields(user_id = %session_user.0.identity.user_id, product_id = %product_id)
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  product_id: web::Path<Uuid>,
  req_payload: web::Json<NewProduct>,
  session_user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let vendor_id = require_vendor(&session_user)?;
  let product_id = product_id.into_inner();

  let existing = app_state
    .catalog
    .get_product(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

  if existing.vendor_id != vendor_id {
    warn!(owner = %existing.vendor_id, "update rejected: product belongs to another vendor");
    return Err(AppError::Forbidden("You can only edit your own products.".to_string()));
  }

  let payload = req_payload.into_inner();
  payload.validate().map_err(AppError::Validation)?;

  let updated = Product {
    id: existing.id,
    title: payload.title,
    category: payload.category,
    brand: payload.brand,
    description: payload.description,
    image_url: payload.image_url,
    price_cents: payload.price_cents,
    stock: payload.stock,
    vendor_id: existing.vendor_id,
    created_at: existing.created_at,
  };
  app_state.catalog.update_product(updated.clone()).await?;

  info!("product updated");

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated successfully!",
      "product": updated,
  })))
}
