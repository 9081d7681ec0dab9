//! Inventory seed
//!
//! Resets the inventory database (users, companies, locations, products and
//! history records) and fills it with a fully cross-referenced fixture for
//! demos and tests.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
