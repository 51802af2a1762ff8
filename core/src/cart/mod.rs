// core/src/cart/mod.rs

//! The shopping-cart subsystem: a pure state-transition function over line
//! items plus the controller that owns its state, binds it to the current
//! identity, and persists it.

pub mod controller;
pub mod reducer;

pub use controller::{cart_key, CartController};
pub use reducer::{apply, CartOp};
