//! Label to id registry used while seeding

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Collection,
};

/// Ids generated for seeded records, keyed by collection and label
#[derive(Debug, Default)]
pub struct SeedRefs {
    ids: IndexMap<(Collection, String), Uuid>,
}

impl SeedRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an id for a new record and remember it under `label`
    pub fn assign(&mut self, collection: Collection, label: &str) -> AppResult<Uuid> {
        let key = (collection, label.to_string());
        if self.ids.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "Label '{}' already assigned in {}",
                label, collection
            )));
        }
        let id = Uuid::new_v4();
        self.ids.insert(key, id);
        Ok(id)
    }

    pub fn resolve(&self, collection: Collection, label: &str) -> AppResult<Uuid> {
        self.ids
            .get(&(collection, label.to_string()))
            .copied()
            .ok_or_else(|| AppError::UnresolvedReference {
                collection,
                label: label.to_string(),
            })
    }

    /// Labels of a collection with their ids, in assignment order
    pub fn entries(&self, collection: Collection) -> Vec<(&str, Uuid)> {
        self.ids
            .iter()
            .filter(|((c, _), _)| *c == collection)
            .map(|((_, label), id)| (label.as_str(), *id))
            .collect()
    }
}
