//! Seed service
//!
//! Brings a store from any prior state to the fixture state:
//!
//! `connected → cleared → users-seeded → organizations-seeded →
//! products-seeded → history-seeded → terminated`
//!
//! Each step runs only after the previous one succeeded. The first failure
//! ends the run; nothing already written is undone unless the caller runs
//! the store inside a transaction.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        Collection, CollectionCounts, NewCompany, NewHistory, NewLocation, NewProduct, NewUser,
        StatusEntry,
    },
    repository::SeedStore,
    services::{
        fixtures::{Fixture, OrganizationSeed},
        refs::SeedRefs,
        reset,
    },
};

/// Progress of a seed run over an already connected store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhase {
    Connected,
    Cleared,
    UsersSeeded,
    OrganizationsSeeded,
    ProductsSeeded,
    HistorySeeded,
    Succeeded,
}

impl std::fmt::Display for SeedPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SeedPhase::Connected => "connected",
            SeedPhase::Cleared => "cleared",
            SeedPhase::UsersSeeded => "users-seeded",
            SeedPhase::OrganizationsSeeded => "organizations-seeded",
            SeedPhase::ProductsSeeded => "products-seeded",
            SeedPhase::HistorySeeded => "history-seeded",
            SeedPhase::Succeeded => "terminated(success)",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a successful seed run
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub phase: SeedPhase,
    pub cleared: CollectionCounts,
    pub inserted: CollectionCounts,
}

impl SeedReport {
    fn advance(&mut self, phase: SeedPhase) {
        tracing::debug!("Seed phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

impl Default for SeedReport {
    fn default() -> Self {
        Self {
            phase: SeedPhase::Connected,
            cleared: CollectionCounts::default(),
            inserted: CollectionCounts::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeedService {
    fixture: Fixture,
}

impl SeedService {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Reset the store and insert the fixture.
    ///
    /// `now` stamps purchase dates and initial history statuses.
    pub async fn run<S: SeedStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> AppResult<SeedReport> {
        // A broken fixture must fail before the reset destroys anything
        self.fixture.check()?;

        let mut report = SeedReport::default();
        match self.run_steps(store, now, &mut report).await {
            Ok(()) => {
                report.advance(SeedPhase::Succeeded);
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Seeding aborted after phase '{}': {}", report.phase, e);
                Err(e)
            }
        }
    }

    async fn run_steps<S: SeedStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
        report: &mut SeedReport,
    ) -> AppResult<()> {
        let mut refs = SeedRefs::new();

        report.cleared = reset::clear_collections(store).await?;
        report.advance(SeedPhase::Cleared);
        tracing::info!("Existing data cleared ({} records removed)", report.cleared.total());

        let users = self.build_users(&mut refs)?;
        let count = store.insert_users(&users).await?;
        report.inserted.set(Collection::Users, count);
        report.advance(SeedPhase::UsersSeeded);
        tracing::info!("Users created ({})", count);

        let companies: Vec<NewCompany> = self
            .fixture
            .companies
            .iter()
            .map(|seed| {
                let (id, created_by) = Self::organization_ids(&mut refs, Collection::Companies, seed)?;
                Ok(NewCompany {
                    id,
                    name: seed.name.clone(),
                    description: seed.description.clone(),
                    created_by,
                })
            })
            .collect::<AppResult<_>>()?;
        let count = store.insert_companies(&companies).await?;
        report.inserted.set(Collection::Companies, count);
        tracing::info!("Companies created ({})", count);

        let locations: Vec<NewLocation> = self
            .fixture
            .locations
            .iter()
            .map(|seed| {
                let (id, created_by) = Self::organization_ids(&mut refs, Collection::Locations, seed)?;
                Ok(NewLocation {
                    id,
                    name: seed.name.clone(),
                    description: seed.description.clone(),
                    created_by,
                })
            })
            .collect::<AppResult<_>>()?;
        let count = store.insert_locations(&locations).await?;
        report.inserted.set(Collection::Locations, count);
        report.advance(SeedPhase::OrganizationsSeeded);
        tracing::info!("Locations created ({})", count);

        let products: Vec<NewProduct> = self
            .fixture
            .products
            .iter()
            .map(|seed| {
                Ok(NewProduct {
                    id: uuid::Uuid::new_v4(),
                    title: seed.title.clone(),
                    description: seed.description.clone(),
                    serial_no: seed.serial_no.clone(),
                    created_by: refs.resolve(Collection::Users, &seed.created_by)?,
                    manufacturer: refs.resolve(Collection::Companies, &seed.manufacturer)?,
                    model: seed.model.clone(),
                    date_of_purchase: Some(now),
                    warranty_months: seed.warranty_months,
                    user_label: seed.user.clone(),
                })
            })
            .collect::<AppResult<_>>()?;
        let count = store.insert_products(&products).await?;
        report.inserted.set(Collection::Products, count);
        report.advance(SeedPhase::ProductsSeeded);
        tracing::info!("Products created ({})", count);

        let histories: Vec<NewHistory> = self
            .fixture
            .histories
            .iter()
            .map(|seed| {
                Ok(NewHistory {
                    id: uuid::Uuid::new_v4(),
                    location: refs.resolve(Collection::Locations, &seed.location)?,
                    status: seed
                        .status
                        .iter()
                        .map(|name| StatusEntry {
                            name: name.clone(),
                            date: now,
                        })
                        .collect(),
                })
            })
            .collect::<AppResult<_>>()?;
        let count = store.insert_histories(&histories).await?;
        report.inserted.set(Collection::Histories, count);
        report.advance(SeedPhase::HistorySeeded);
        tracing::info!("History records created ({})", count);

        for collection in [Collection::Users, Collection::Companies, Collection::Locations] {
            for (label, id) in refs.entries(collection) {
                tracing::debug!("{} '{}' -> {}", collection, label, id);
            }
        }

        Ok(())
    }

    fn build_users(&self, refs: &mut SeedRefs) -> AppResult<Vec<NewUser>> {
        let argon2 = Argon2::default();
        self.fixture
            .users
            .iter()
            .map(|seed| {
                let salt = SaltString::generate(&mut OsRng);
                let password_hash = argon2
                    .hash_password(seed.password.as_bytes(), &salt)
                    .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?
                    .to_string();
                Ok(NewUser {
                    id: refs.assign(Collection::Users, &seed.label)?,
                    name: seed.name.clone(),
                    email: seed.email.clone(),
                    password_hash,
                    role: seed.role,
                })
            })
            .collect()
    }

    /// Assign the record's id and resolve its creator
    fn organization_ids(
        refs: &mut SeedRefs,
        collection: Collection,
        seed: &OrganizationSeed,
    ) -> AppResult<(uuid::Uuid, uuid::Uuid)> {
        let created_by = refs.resolve(Collection::Users, &seed.created_by)?;
        let id = refs.assign(collection, &seed.label)?;
        Ok((id, created_by))
    }
}
