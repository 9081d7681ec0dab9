//! Post-seed verification
//!
//! Checks a snapshot of the store against a fixture. All violations are
//! collected so one run reports everything that is wrong.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Collection, CollectionCounts, Snapshot},
    repository::SeedStore,
    services::fixtures::Fixture,
};

#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub counts: CollectionCounts,
    pub violations: Vec<String>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self) -> AppResult<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(AppError::Verification(self.violations))
        }
    }
}

/// Read the store and verify it against the fixture
pub async fn verify_store<S: SeedStore + ?Sized>(
    store: &mut S,
    fixture: &Fixture,
) -> AppResult<VerificationReport> {
    let snapshot = store.snapshot().await?;
    verify(&snapshot, fixture).into_result()
}

pub fn verify(snapshot: &Snapshot, fixture: &Fixture) -> VerificationReport {
    let mut violations = Vec::new();

    let counts = snapshot.counts();
    let expected = fixture.expected_counts();
    for collection in Collection::INSERT_ORDER {
        if counts.get(collection) != expected.get(collection) {
            violations.push(format!(
                "{} holds {} records, expected {}",
                collection,
                counts.get(collection),
                expected.get(collection)
            ));
        }
    }

    let user_ids: HashSet<Uuid> = snapshot.users.iter().map(|u| u.id).collect();
    let company_ids: HashSet<Uuid> = snapshot.companies.iter().map(|c| c.id).collect();
    let location_ids: HashSet<Uuid> = snapshot.locations.iter().map(|l| l.id).collect();

    let mut emails = HashSet::new();
    for user in &snapshot.users {
        if !emails.insert(user.email.to_lowercase()) {
            violations.push(format!("email {} is not unique", user.email));
        }
    }

    let mut serials = HashSet::new();
    for product in &snapshot.products {
        if !serials.insert(product.serial_no.as_str()) {
            violations.push(format!("serial number {} is not unique", product.serial_no));
        }
    }

    for company in &snapshot.companies {
        if !user_ids.contains(&company.created_by) {
            violations.push(format!("company {} created by unknown user", company.name));
        }
    }
    for location in &snapshot.locations {
        if !user_ids.contains(&location.created_by) {
            violations.push(format!("location {} created by unknown user", location.name));
        }
    }
    for product in &snapshot.products {
        if !user_ids.contains(&product.created_by) {
            violations.push(format!("product {} created by unknown user", product.serial_no));
        }
        if !company_ids.contains(&product.manufacturer) {
            violations.push(format!("product {} made by unknown company", product.serial_no));
        }
    }
    for history in &snapshot.histories {
        if !location_ids.contains(&history.location) {
            violations.push(format!("history {} at unknown location", history.id));
        }
        if history.current_status().is_none() {
            violations.push(format!("history {} has no status", history.id));
        }
    }

    check_fixture_links(snapshot, fixture, &mut violations);

    VerificationReport { counts, violations }
}

/// Compare who references whom with what the fixture's labels say
fn check_fixture_links(snapshot: &Snapshot, fixture: &Fixture, violations: &mut Vec<String>) {
    let user_by_email: HashMap<String, Uuid> = snapshot
        .users
        .iter()
        .map(|u| (u.email.to_lowercase(), u.id))
        .collect();
    let company_by_name: HashMap<&str, Uuid> =
        snapshot.companies.iter().map(|c| (c.name.as_str(), c.id)).collect();
    let location_by_name: HashMap<&str, Uuid> =
        snapshot.locations.iter().map(|l| (l.name.as_str(), l.id)).collect();

    let user_id = |label: &str| {
        fixture
            .user(label)
            .and_then(|u| user_by_email.get(&u.email.to_lowercase()).copied())
    };
    let company_id = |label: &str| {
        fixture
            .company(label)
            .and_then(|c| company_by_name.get(c.name.as_str()).copied())
    };

    for seed in &fixture.companies {
        if let Some(company) = snapshot.companies.iter().find(|c| c.name == seed.name) {
            if user_id(&seed.created_by) != Some(company.created_by) {
                violations.push(format!(
                    "company {} should be created by '{}'",
                    seed.name, seed.created_by
                ));
            }
        }
    }
    for seed in &fixture.locations {
        if let Some(location) = snapshot.locations.iter().find(|l| l.name == seed.name) {
            if user_id(&seed.created_by) != Some(location.created_by) {
                violations.push(format!(
                    "location {} should be created by '{}'",
                    seed.name, seed.created_by
                ));
            }
        }
    }
    for seed in &fixture.products {
        match snapshot.products.iter().find(|p| p.serial_no == seed.serial_no) {
            Some(product) => {
                if user_id(&seed.created_by) != Some(product.created_by) {
                    violations.push(format!(
                        "product {} should be created by '{}'",
                        seed.serial_no, seed.created_by
                    ));
                }
                if company_id(&seed.manufacturer) != Some(product.manufacturer) {
                    violations.push(format!(
                        "product {} should be made by '{}'",
                        seed.serial_no, seed.manufacturer
                    ));
                }
            }
            None => violations.push(format!("product {} is missing", seed.serial_no)),
        }
    }
    for seed in &fixture.histories {
        let location = fixture
            .location(&seed.location)
            .and_then(|l| location_by_name.get(l.name.as_str()).copied());
        let found = snapshot.histories.iter().any(|h| {
            Some(h.location) == location
                && h.status
                    .iter()
                    .map(|s| s.name.as_str())
                    .eq(seed.status.iter().map(String::as_str))
        });
        if !found {
            violations.push(format!(
                "no history at '{}' with status [{}]",
                seed.location,
                seed.status.join(", ")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use crate::services::{fixtures::inventory_fixture, seed::SeedService};
    use chrono::Utc;

    async fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        SeedService::new(inventory_fixture())
            .run(&mut store, Utc::now())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_seeded_store_verifies() {
        let store = seeded().await;
        let report = verify(store.data(), &inventory_fixture());
        assert!(report.is_ok(), "{:?}", report.violations);
        assert_eq!(report.counts, inventory_fixture().expected_counts());
    }

    #[test]
    fn test_empty_store_reports_counts() {
        let report = verify(&Snapshot::default(), &inventory_fixture());
        assert!(!report.is_ok());
        assert!(report
            .violations
            .iter()
            .any(|v| v == "users holds 0 records, expected 5"));
        assert!(matches!(report.into_result(), Err(AppError::Verification(_))));
    }

    #[tokio::test]
    async fn test_swapped_creator_detected() {
        let store = seeded().await;
        let mut snapshot = store.data().clone();
        let john = snapshot
            .users
            .iter()
            .find(|u| u.email == "john@example.com")
            .map(|u| u.id)
            .unwrap();
        snapshot.companies[0].created_by = john;

        let report = verify(&snapshot, &inventory_fixture());
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].contains("should be created by 'admin'"));
    }

    #[tokio::test]
    async fn test_swapped_history_locations_detected() {
        let store = seeded().await;
        let mut snapshot = store.data().clone();
        let first = snapshot.histories[0].location;
        snapshot.histories[0].location = snapshot.histories[1].location;
        snapshot.histories[1].location = first;

        let report = verify(&snapshot, &inventory_fixture());
        assert_eq!(
            report.violations,
            vec![
                "no history at 'warehouse-1' with status [in use]".to_string(),
                "no history at 'office-hq' with status [not in use]".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_changed_history_status_detected() {
        let store = seeded().await;
        let mut snapshot = store.data().clone();
        snapshot.histories[0].status.0[0].name = "under repair".to_string();

        let report = verify(&snapshot, &inventory_fixture());
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].starts_with("no history at 'warehouse-1'"));
    }

    #[tokio::test]
    async fn test_dangling_history_location_detected() {
        let store = seeded().await;
        let mut snapshot = store.data().clone();
        snapshot.histories[1].location = Uuid::new_v4();

        let report = verify(&snapshot, &inventory_fixture());
        assert!(report
            .violations
            .iter()
            .any(|v| v.contains("at unknown location")));
    }
}
