// src/lib.rs

//! eshop: domain library for a two-role (customer/vendor) storefront.
//!
//! The interesting part is the shopping-cart subsystem:
//!  - A pure, total reducer over cart line items (`cart::reducer`).
//!  - A controller that binds the reducer's state to the current identity
//!    and to a durable key-value store (`cart::CartController`).
//!  - A checkout committer that validates requested quantities against
//!    authoritative stock and decrements it atomically (`checkout`).
//!
//! Everything remote (catalog, user directory) sits behind async traits in
//! `stores`, with in-memory implementations standing in for the managed
//! backend. The identity stream of the authentication provider is modeled
//! by `identity::IdentityHub`.

pub mod cart;
pub mod checkout;
pub mod identity;
pub mod models;
pub mod stores;

// --- Re-exports for the Public API ---

pub use crate::cart::controller::CartController;
pub use crate::cart::reducer::{apply, CartOp};
pub use crate::checkout::{commit_checkout, CheckoutError, CheckoutReceipt, Notice, StockViolation};
pub use crate::identity::{Identity, IdentityHub, IdentityWatch};
pub use crate::models::{LineItem, NewProduct, Product, Role, User};
pub use crate::stores::{CatalogStore, KvStore, StoreError, UserStore};
pub use crate::stores::{FileKvStore, MemoryCatalog, MemoryKvStore, MemoryUserStore};
