// core/src/cart/reducer.rs

//! The pure cart transition function.
//!
//! `apply` is total and side-effect free: it never performs I/O and never
//! fails. Operations that name a line absent from the cart are no-ops
//! returning the input unchanged.

use uuid::Uuid;

use crate::models::{LineItem, Product};

/// A cart state transition.
#[derive(Debug, Clone)]
pub enum CartOp {
  /// Replaces the entire cart. Used when a persisted cart is loaded for a
  /// newly bound identity.
  Init(Vec<LineItem>),
  /// Adds one unit of `product`. An existing line for the same product id
  /// gains quantity only; its display snapshot stays as taken at first add.
  Add(Product),
  /// Drops the line with this product id.
  Remove(Uuid),
  /// Adds one to an existing line's quantity, saturating at `u32::MAX`.
  Increment(Uuid),
  /// Subtracts one from an existing line's quantity, flooring at 1. A line
  /// is never removed or zeroed through decrement.
  Decrement(Uuid),
  /// Sets an existing line's quantity verbatim. Callers are responsible
  /// for clamping to >= 1; the reducer does not re-validate.
  SetQuantity(Uuid, u32),
  /// Empties the cart.
  Clear,
}

/// Computes the cart that results from applying `op` to `cart`.
pub fn apply(cart: &[LineItem], op: &CartOp) -> Vec<LineItem> {
  match op {
    CartOp::Init(items) => items.clone(),
    CartOp::Add(product) => {
      if cart.iter().any(|item| item.product_id == product.id) {
        cart
          .iter()
          .map(|item| {
            if item.product_id == product.id {
              LineItem {
                quantity: item.quantity.saturating_add(1),
                ..item.clone()
              }
            } else {
              item.clone()
            }
          })
          .collect()
      } else {
        let mut next = cart.to_vec();
        next.push(LineItem::from_product(product));
        next
      }
    }
    CartOp::Remove(id) => cart.iter().filter(|item| item.product_id != *id).cloned().collect(),
    CartOp::Increment(id) => cart
      .iter()
      .map(|item| {
        if item.product_id == *id {
          LineItem {
            quantity: item.quantity.saturating_add(1),
            ..item.clone()
          }
        } else {
          item.clone()
        }
      })
      .collect(),
    CartOp::Decrement(id) => cart
      .iter()
      .map(|item| {
        if item.product_id == *id && item.quantity > 1 {
          LineItem {
            quantity: item.quantity - 1,
            ..item.clone()
          }
        } else {
          item.clone()
        }
      })
      .collect(),
    CartOp::SetQuantity(id, quantity) => cart
      .iter()
      .map(|item| {
        if item.product_id == *id {
          LineItem {
            quantity: *quantity,
            ..item.clone()
          }
        } else {
          item.clone()
        }
      })
      .collect(),
    CartOp::Clear => Vec::new(),
  }
}
