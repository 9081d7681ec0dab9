//! Company model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Company record (product manufacturers)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// User who registered the company
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Company ready for insertion
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
}
