//! Collection reset
//!
//! Deleting every record is irreversible, so it is kept apart from the
//! insertion logic and behind an environment guard.

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::{Collection, CollectionCounts},
    repository::SeedStore,
};

/// Refuse the reset unless the environment allows it or the operator forced it
pub fn ensure_reset_allowed(config: &AppConfig, force: bool) -> AppResult<()> {
    if config.reset_allowed() {
        return Ok(());
    }
    if force {
        tracing::warn!(
            "Forcing reset in environment '{}' (allowed: {})",
            config.environment,
            config.seed.allowed_environments.join(", ")
        );
        return Ok(());
    }
    Err(AppError::Refused(format!(
        "Reset is not allowed in environment '{}'; allowed environments are [{}], use --force to override",
        config.environment,
        config.seed.allowed_environments.join(", ")
    )))
}

/// Delete all records of the five collections, dependents first
pub async fn clear_collections<S: SeedStore + ?Sized>(store: &mut S) -> AppResult<CollectionCounts> {
    let mut removed = CollectionCounts::default();
    for collection in Collection::RESET_ORDER {
        let count = store.clear(collection).await?;
        tracing::debug!("Cleared {} records from {}", count, collection);
        removed.set(collection, count);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use crate::services::{fixtures::inventory_fixture, seed::SeedService};
    use chrono::Utc;

    fn config(environment: &str) -> AppConfig {
        AppConfig {
            environment: environment.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_guard_allows_development() {
        assert!(ensure_reset_allowed(&config("development"), false).is_ok());
        assert!(ensure_reset_allowed(&config("test"), false).is_ok());
    }

    #[test]
    fn test_guard_refuses_production_without_force() {
        let result = ensure_reset_allowed(&config("production"), false);
        assert!(matches!(result, Err(AppError::Refused(_))));
        assert!(ensure_reset_allowed(&config("production"), true).is_ok());
    }

    #[tokio::test]
    async fn test_clear_collections_empties_everything() {
        let mut store = MemoryStore::new();
        SeedService::new(inventory_fixture())
            .run(&mut store, Utc::now())
            .await
            .unwrap();

        let removed = clear_collections(&mut store).await.unwrap();
        assert_eq!(removed, inventory_fixture().expected_counts());
        assert_eq!(store.data().counts().total(), 0);
    }
}
