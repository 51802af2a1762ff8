// core/src/models/mod.rs

//! Data structures representing storefront entities.

pub mod line_item;
pub mod product;
pub mod user;

pub use line_item::LineItem;
pub use product::{NewProduct, Product};
pub use user::{Role, User};
