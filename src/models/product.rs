//! Product model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Tracked product
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Manufacturer serial number, unique across products
    pub serial_no: String,
    pub created_by: Uuid,
    /// Company that manufactured the product
    pub manufacturer: Uuid,
    pub model: Option<String>,
    pub date_of_purchase: Option<DateTime<Utc>>,
    pub warranty_months: i32,
    /// Free-text label of whoever holds the product
    pub user_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product ready for insertion
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub serial_no: String,
    pub created_by: Uuid,
    pub manufacturer: Uuid,
    pub model: Option<String>,
    pub date_of_purchase: Option<DateTime<Utc>>,
    pub warranty_months: i32,
    pub user_label: Option<String>,
}
