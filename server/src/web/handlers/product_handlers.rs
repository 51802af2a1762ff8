// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::browse::{self, CatalogFilter};
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug, Default)]
pub struct BrowseQuery {
  /// Case-insensitive substring match on product titles.
  pub q: Option<String>,
  pub category: Option<String>,
  pub price_min_cents: Option<i64>,
  pub price_max_cents: Option<i64>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::list_products", skip(app_state, query), fields(search = ?query.q, category = ?query.category))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<BrowseQuery>,
) -> Result<HttpResponse, AppError> {
  let all = app_state.catalog.list_products().await?;

  let filter = CatalogFilter {
    search: query.q.clone(),
    category: query.category.clone(),
    price_min_cents: query.price_min_cents,
    price_max_cents: query.price_max_cents,
  };
  let products = browse::filter_products(&all, &filter);

  // Categories are derived from the full catalog so the filter picker
  // doesn't shrink as filters narrow the results.
  Ok(HttpResponse::Ok().json(json!({
      "products": products,
      "categories": browse::categories(&all),
  })))
}

#[instrument(name = "handler::get_product", skip(app_state), fields(product_id = %product_id))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  product_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = product_id.into_inner();
  let product = app_state
    .catalog
    .get_product(product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

  Ok(HttpResponse::Ok().json(product))
}
