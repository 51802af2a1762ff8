// server/src/services/mod.rs

//! Application services: authentication, session registry, catalog
//! queries, and startup seeding.

pub mod auth;
pub mod browse;
pub mod seed;
pub mod sessions;
