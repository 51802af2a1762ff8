// server/src/services/browse.rs

//! Pure catalog-query helpers behind the customer dashboard and the
//! vendor product table. Filtering is exact/substring matching only; no
//! ranking.

use eshop::models::Product;

/// Rows per vendor-table page.
pub const PAGE_SIZE: usize = 10;

/// Customer-side catalog filter. All criteria are conjunctive; absent
/// criteria match everything.
#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
  /// Case-insensitive substring match on the product title.
  pub search: Option<String>,
  /// Exact category match.
  pub category: Option<String>,
  /// Inclusive price band, in cents.
  pub price_min_cents: Option<i64>,
  pub price_max_cents: Option<i64>,
}

pub fn filter_products(products: &[Product], filter: &CatalogFilter) -> Vec<Product> {
  let needle = filter
    .search
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);

  products
    .iter()
    .filter(|p| match &needle {
      Some(needle) => p.title.to_lowercase().contains(needle),
      None => true,
    })
    .filter(|p| match &filter.category {
      Some(category) => &p.category == category,
      None => true,
    })
    .filter(|p| filter.price_min_cents.map_or(true, |min| p.price_cents >= min))
    .filter(|p| filter.price_max_cents.map_or(true, |max| p.price_cents <= max))
    .cloned()
    .collect()
}

/// Distinct non-empty categories, in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
  let mut seen = Vec::new();
  for p in products {
    if !p.category.is_empty() && !seen.contains(&p.category) {
      seen.push(p.category.clone());
    }
  }
  seen
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
  Price,
  Stock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
  Asc,
  Desc,
}

#[derive(Debug, Clone)]
pub struct TablePage {
  pub products: Vec<Product>,
  pub page: usize,
  pub total_pages: usize,
}

/// Vendor table view: optional category filter, sort by price or stock,
/// fixed-size pages. Pages are 1-based; out-of-range requests clamp to the
/// valid range.
pub fn vendor_table(
  mut products: Vec<Product>,
  category: Option<&str>,
  sort_by: SortBy,
  order: SortOrder,
  page: usize,
) -> TablePage {
  if let Some(category) = category {
    products.retain(|p| p.category == category);
  }

  products.sort_by_key(|p| match sort_by {
    SortBy::Price => p.price_cents,
    SortBy::Stock => p.stock,
  });
  if order == SortOrder::Desc {
    products.reverse();
  }

  let total_pages = products.len().div_ceil(PAGE_SIZE).max(1);
  let page = page.clamp(1, total_pages);
  let start = (page - 1) * PAGE_SIZE;
  let products = products.into_iter().skip(start).take(PAGE_SIZE).collect();

  TablePage {
    products,
    page,
    total_pages,
  }
}
