// server/src/services/seed.rs

//! Demo catalog seeding for local development.

use chrono::Utc;
use eshop::models::Product;
use eshop::stores::CatalogStore;
use uuid::Uuid;

use crate::errors::Result;

pub async fn seed_catalog(catalog: &dyn CatalogStore) -> Result<()> {
  if !catalog.list_products().await?.is_empty() {
    tracing::info!("catalog already populated, skipping seed");
    return Ok(());
  }

  let vendor_id = Uuid::new_v4();
  let demo = [
    ("Gaming Keyboard", "Electronics", "KeyCo", 4_999, 25),
    ("27\" Monitor", "Electronics", "ViewMax", 19_900, 12),
    ("Office Chair", "Furniture", "SitWell", 12_500, 8),
    ("Standing Desk", "Furniture", "SitWell", 89_900, 3),
    ("USB-C Cable", "Accessories", "KeyCo", 799, 140),
  ];

  for (title, category, brand, price_cents, stock) in demo {
    catalog
      .insert_product(Product {
        id: Uuid::new_v4(),
        title: title.to_string(),
        category: category.to_string(),
        brand: brand.to_string(),
        description: format!("{title} by {brand}."),
        image_url: format!(
          "https://via.placeholder.com/300?text={}",
          title.replace(' ', "+")
        ),
        price_cents,
        stock,
        vendor_id,
        created_at: Utc::now(),
      })
      .await?;
  }

  tracing::info!(count = demo.len(), "demo catalog seeded");
  Ok(())
}
