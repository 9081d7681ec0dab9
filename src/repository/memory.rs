//! In-memory store
//!
//! Mirrors the constraints of the PostgreSQL schema: unique user emails
//! (case-insensitive), unique product serial numbers, references checked on
//! insert, and deletes refused while another collection still points at a
//! record. A batch is validated as a whole before any record is stored.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use super::SeedStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        Collection, Company, History, Location, NewCompany, NewHistory, NewLocation, NewProduct,
        NewUser, Product, Snapshot, User,
    },
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Snapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, without going through the async trait
    pub fn data(&self) -> &Snapshot {
        &self.data
    }

    fn has_user(&self, id: Uuid) -> bool {
        self.data.users.iter().any(|u| u.id == id)
    }

    fn has_company(&self, id: Uuid) -> bool {
        self.data.companies.iter().any(|c| c.id == id)
    }

    fn has_location(&self, id: Uuid) -> bool {
        self.data.locations.iter().any(|l| l.id == id)
    }

    /// Collections still referencing records of `collection`
    fn dependents(&self, collection: Collection) -> Vec<Collection> {
        let mut found = Vec::new();
        match collection {
            Collection::Users => {
                if !self.data.companies.is_empty() {
                    found.push(Collection::Companies);
                }
                if !self.data.locations.is_empty() {
                    found.push(Collection::Locations);
                }
                if !self.data.products.is_empty() {
                    found.push(Collection::Products);
                }
            }
            Collection::Companies => {
                if !self.data.products.is_empty() {
                    found.push(Collection::Products);
                }
            }
            Collection::Locations => {
                if !self.data.histories.is_empty() {
                    found.push(Collection::Histories);
                }
            }
            Collection::Products | Collection::Histories => {}
        }
        found
    }

    fn ensure_unique_ids<'a>(
        collection: Collection,
        existing: impl Iterator<Item = Uuid>,
        incoming: impl Iterator<Item = &'a Uuid>,
    ) -> AppResult<()> {
        let mut seen: HashSet<Uuid> = existing.collect();
        for id in incoming {
            if !seen.insert(*id) {
                return Err(AppError::Conflict(format!(
                    "Duplicate id {} in {}",
                    id, collection
                )));
            }
        }
        Ok(())
    }

    fn missing_reference(collection: Collection, target: Collection, id: Uuid) -> AppError {
        AppError::Conflict(format!(
            "{} references missing {} record {}",
            collection, target, id
        ))
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn clear(&mut self, collection: Collection) -> AppResult<u64> {
        let dependents = self.dependents(collection);
        if !dependents.is_empty() {
            let names: Vec<&str> = dependents.iter().map(|c| c.table_name()).collect();
            return Err(AppError::Conflict(format!(
                "Cannot clear {} while referenced by {}",
                collection,
                names.join(", ")
            )));
        }

        let removed = match collection {
            Collection::Users => std::mem::take(&mut self.data.users).len(),
            Collection::Companies => std::mem::take(&mut self.data.companies).len(),
            Collection::Locations => std::mem::take(&mut self.data.locations).len(),
            Collection::Products => std::mem::take(&mut self.data.products).len(),
            Collection::Histories => std::mem::take(&mut self.data.histories).len(),
        };
        Ok(removed as u64)
    }

    async fn insert_users(&mut self, users: &[NewUser]) -> AppResult<u64> {
        Self::ensure_unique_ids(
            Collection::Users,
            self.data.users.iter().map(|u| u.id),
            users.iter().map(|u| &u.id),
        )?;

        let mut emails: HashSet<String> =
            self.data.users.iter().map(|u| u.email.to_lowercase()).collect();
        for user in users {
            if !emails.insert(user.email.to_lowercase()) {
                return Err(AppError::Conflict(format!(
                    "Email {} already exists",
                    user.email
                )));
            }
        }

        let now = Utc::now();
        self.data.users.extend(users.iter().map(|u| User {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            role: u.role,
            created_at: now,
        }));
        Ok(users.len() as u64)
    }

    async fn insert_companies(&mut self, companies: &[NewCompany]) -> AppResult<u64> {
        Self::ensure_unique_ids(
            Collection::Companies,
            self.data.companies.iter().map(|c| c.id),
            companies.iter().map(|c| &c.id),
        )?;
        if let Some(company) = companies.iter().find(|c| !self.has_user(c.created_by)) {
            return Err(Self::missing_reference(
                Collection::Companies,
                Collection::Users,
                company.created_by,
            ));
        }

        let now = Utc::now();
        self.data.companies.extend(companies.iter().map(|c| Company {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            created_by: c.created_by,
            created_at: now,
        }));
        Ok(companies.len() as u64)
    }

    async fn insert_locations(&mut self, locations: &[NewLocation]) -> AppResult<u64> {
        Self::ensure_unique_ids(
            Collection::Locations,
            self.data.locations.iter().map(|l| l.id),
            locations.iter().map(|l| &l.id),
        )?;
        if let Some(location) = locations.iter().find(|l| !self.has_user(l.created_by)) {
            return Err(Self::missing_reference(
                Collection::Locations,
                Collection::Users,
                location.created_by,
            ));
        }

        let now = Utc::now();
        self.data.locations.extend(locations.iter().map(|l| Location {
            id: l.id,
            name: l.name.clone(),
            description: l.description.clone(),
            created_by: l.created_by,
            created_at: now,
        }));
        Ok(locations.len() as u64)
    }

    async fn insert_products(&mut self, products: &[NewProduct]) -> AppResult<u64> {
        Self::ensure_unique_ids(
            Collection::Products,
            self.data.products.iter().map(|p| p.id),
            products.iter().map(|p| &p.id),
        )?;

        let mut serials: HashSet<&str> =
            self.data.products.iter().map(|p| p.serial_no.as_str()).collect();
        for product in products {
            if !serials.insert(product.serial_no.as_str()) {
                return Err(AppError::Conflict(format!(
                    "Serial number {} already exists",
                    product.serial_no
                )));
            }
            if !self.has_user(product.created_by) {
                return Err(Self::missing_reference(
                    Collection::Products,
                    Collection::Users,
                    product.created_by,
                ));
            }
            if !self.has_company(product.manufacturer) {
                return Err(Self::missing_reference(
                    Collection::Products,
                    Collection::Companies,
                    product.manufacturer,
                ));
            }
            if product.warranty_months < 0 {
                return Err(AppError::Validation(format!(
                    "Product {} has negative warranty",
                    product.serial_no
                )));
            }
        }

        let now = Utc::now();
        self.data.products.extend(products.iter().map(|p| Product {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            serial_no: p.serial_no.clone(),
            created_by: p.created_by,
            manufacturer: p.manufacturer,
            model: p.model.clone(),
            date_of_purchase: p.date_of_purchase,
            warranty_months: p.warranty_months,
            user_label: p.user_label.clone(),
            created_at: now,
        }));
        Ok(products.len() as u64)
    }

    async fn insert_histories(&mut self, histories: &[NewHistory]) -> AppResult<u64> {
        Self::ensure_unique_ids(
            Collection::Histories,
            self.data.histories.iter().map(|h| h.id),
            histories.iter().map(|h| &h.id),
        )?;
        if let Some(history) = histories.iter().find(|h| !self.has_location(h.location)) {
            return Err(Self::missing_reference(
                Collection::Histories,
                Collection::Locations,
                history.location,
            ));
        }

        let now = Utc::now();
        self.data.histories.extend(histories.iter().map(|h| History {
            id: h.id,
            location: h.location,
            status: Json(h.status.clone()),
            created_at: now,
        }));
        Ok(histories.len() as u64)
    }

    async fn count(&mut self, collection: Collection) -> AppResult<u64> {
        Ok(self.data.counts().get(collection))
    }

    async fn snapshot(&mut self) -> AppResult<Snapshot> {
        Ok(self.data.clone())
    }
}
