//! Per-user shopping cart service.
//!
//! [`store::CartStore`] owns the `(user_id, product_id) -> quantity` mapping;
//! [`routes`] exposes it over HTTP.

pub mod app_error;
pub mod app_state;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
pub mod swagger;
