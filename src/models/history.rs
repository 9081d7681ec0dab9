//! History model
//!
//! A history record tracks the status of a location over time. The status
//! column holds the entries as a JSON array, oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// One dated status entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub name: String,
    pub date: DateTime<Utc>,
}

/// Stored history record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct History {
    pub id: Uuid,
    pub location: Uuid,
    pub status: Json<Vec<StatusEntry>>,
    pub created_at: DateTime<Utc>,
}

impl History {
    /// Most recent status entry
    pub fn current_status(&self) -> Option<&StatusEntry> {
        self.status.last()
    }
}

/// History ready for insertion
#[derive(Debug, Clone)]
pub struct NewHistory {
    pub id: Uuid,
    pub location: Uuid,
    pub status: Vec<StatusEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_status_is_last_entry() {
        let earlier = Utc::now() - chrono::Duration::days(1);
        let now = Utc::now();
        let history = History {
            id: Uuid::new_v4(),
            location: Uuid::new_v4(),
            status: Json(vec![
                StatusEntry { name: "in use".to_string(), date: earlier },
                StatusEntry { name: "not in use".to_string(), date: now },
            ]),
            created_at: now,
        };
        assert_eq!(history.current_status().map(|s| s.name.as_str()), Some("not in use"));
    }

    #[test]
    fn test_status_json_shape() {
        let entry = StatusEntry {
            name: "in use".to_string(),
            date: "2024-01-01T00:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["name"], "in use");
        assert_eq!(value["date"], "2024-01-01T00:00:00Z");
    }
}
