//! Seed fixture definitions
//!
//! A fixture describes the records to insert. Records refer to each other by
//! label (`"admin"`, `"techcorp"`) rather than by position, and labels are
//! turned into generated ids while seeding.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Collection, CollectionCounts, Role},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserSeed {
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext, hashed before insertion
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Company or location seed; both share the same shape
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrganizationSeed {
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    /// Label of the creating user
    pub created_by: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductSeed {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub serial_no: String,
    /// Label of the creating user
    pub created_by: String,
    /// Label of the manufacturing company
    pub manufacturer: String,
    pub model: Option<String>,
    #[validate(range(min = 0, message = "Warranty cannot be negative"))]
    pub warranty_months: i32,
    /// Free-text holder label, stored as is
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HistorySeed {
    /// Label of the location
    pub location: String,
    /// Status names, oldest first; each is stamped with the seeding time
    #[validate(length(min = 1, message = "History needs at least one status"))]
    pub status: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Fixture {
    #[validate(nested)]
    pub users: Vec<UserSeed>,
    #[validate(nested)]
    #[serde(default)]
    pub companies: Vec<OrganizationSeed>,
    #[validate(nested)]
    #[serde(default)]
    pub locations: Vec<OrganizationSeed>,
    #[validate(nested)]
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    #[validate(nested)]
    #[serde(default)]
    pub histories: Vec<HistorySeed>,
}

impl Fixture {
    /// Load a fixture from a JSON file
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Fixture(format!("Cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Fixture(format!("Invalid fixture {}: {}", path.display(), e)))
    }

    /// Number of records each collection holds once seeded
    pub fn expected_counts(&self) -> CollectionCounts {
        CollectionCounts {
            users: self.users.len() as u64,
            companies: self.companies.len() as u64,
            locations: self.locations.len() as u64,
            products: self.products.len() as u64,
            histories: self.histories.len() as u64,
        }
    }

    pub fn user(&self, label: &str) -> Option<&UserSeed> {
        self.users.iter().find(|u| u.label == label)
    }

    pub fn company(&self, label: &str) -> Option<&OrganizationSeed> {
        self.companies.iter().find(|c| c.label == label)
    }

    pub fn location(&self, label: &str) -> Option<&OrganizationSeed> {
        self.locations.iter().find(|l| l.label == label)
    }

    /// Full consistency check, run before anything touches the store.
    ///
    /// Covers field validation, label uniqueness, unique company and location
    /// names, unique emails and serial numbers, and that every reference names
    /// a known label.
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;

        unique_within(Collection::Users, "label", self.users.iter().map(|u| u.label.as_str()))?;
        unique_within(Collection::Companies, "label", self.companies.iter().map(|c| c.label.as_str()))?;
        unique_within(Collection::Locations, "label", self.locations.iter().map(|l| l.label.as_str()))?;
        // Verification finds seeded organizations by name
        unique_within(Collection::Companies, "name", self.companies.iter().map(|c| c.name.as_str()))?;
        unique_within(Collection::Locations, "name", self.locations.iter().map(|l| l.name.as_str()))?;

        let mut emails = HashSet::new();
        for user in &self.users {
            if !emails.insert(user.email.to_lowercase()) {
                return Err(AppError::Validation(format!("Duplicate email {}", user.email)));
            }
        }

        let mut serials = HashSet::new();
        for product in &self.products {
            if !serials.insert(product.serial_no.as_str()) {
                return Err(AppError::Validation(format!(
                    "Duplicate serial number {}",
                    product.serial_no
                )));
            }
        }

        for org in self.companies.iter().chain(self.locations.iter()) {
            require(Collection::Users, &org.created_by, self.user(&org.created_by).is_some())?;
        }
        for product in &self.products {
            require(Collection::Users, &product.created_by, self.user(&product.created_by).is_some())?;
            require(
                Collection::Companies,
                &product.manufacturer,
                self.company(&product.manufacturer).is_some(),
            )?;
        }
        for history in &self.histories {
            require(Collection::Locations, &history.location, self.location(&history.location).is_some())?;
        }

        Ok(())
    }
}

fn require(collection: Collection, label: &str, found: bool) -> AppResult<()> {
    if found {
        Ok(())
    } else {
        Err(AppError::UnresolvedReference {
            collection,
            label: label.to_string(),
        })
    }
}

fn unique_within<'a>(
    collection: Collection,
    field: &str,
    values: impl Iterator<Item = &'a str>,
) -> AppResult<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(AppError::Validation(format!(
                "Duplicate {} '{}' in {}",
                field, value, collection
            )));
        }
    }
    Ok(())
}

fn org(label: &str, name: &str, description: &str, created_by: &str) -> OrganizationSeed {
    OrganizationSeed {
        label: label.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        created_by: created_by.to_string(),
    }
}

fn user(label: &str, name: &str, email: &str, password: &str, role: Role) -> UserSeed {
    UserSeed {
        label: label.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Built-in demo data set
pub fn inventory_fixture() -> Fixture {
    Fixture {
        users: vec![
            user("admin", "Admin User", "admin@example.com", "securepass", Role::Admin),
            user("john", "John Doe", "john@example.com", "password123", Role::User),
            user("jane", "Jane Doe", "jane@example.com", "password123", Role::User),
            user("alice", "Alice Smith", "alice@example.com", "password123", Role::User),
            user("bob", "Bob Brown", "bob@example.com", "password123", Role::User),
        ],
        companies: vec![
            org("techcorp", "TechCorp", "Technology Company", "admin"),
            org("bizgroup", "BizGroup", "Business Group", "admin"),
        ],
        locations: vec![
            org("warehouse-1", "Warehouse 1", "Main storage", "admin"),
            org("office-hq", "Office HQ", "Main Office", "admin"),
        ],
        products: vec![
            ProductSeed {
                title: "Laptop".to_string(),
                description: Some("High-performance laptop".to_string()),
                serial_no: "12345ABC".to_string(),
                created_by: "admin".to_string(),
                manufacturer: "techcorp".to_string(),
                model: Some("ProBook 450".to_string()),
                warranty_months: 24,
                user: Some("admin".to_string()),
            },
            ProductSeed {
                title: "Printer".to_string(),
                description: Some("All-in-one printer".to_string()),
                serial_no: "67890XYZ".to_string(),
                created_by: "john".to_string(),
                manufacturer: "bizgroup".to_string(),
                model: Some("PrintMaster 3000".to_string()),
                warranty_months: 12,
                user: Some("normal user".to_string()),
            },
        ],
        histories: vec![
            HistorySeed {
                location: "warehouse-1".to_string(),
                status: vec!["in use".to_string()],
            },
            HistorySeed {
                location: "office-hq".to_string(),
                status: vec!["not in use".to_string()],
            },
        ],
    }
}
