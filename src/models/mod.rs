//! Data models for the inventory collections

pub mod company;
pub mod history;
pub mod location;
pub mod product;
pub mod user;

// Re-export commonly used types
pub use company::{Company, NewCompany};
pub use history::{History, NewHistory, StatusEntry};
pub use location::{Location, NewLocation};
pub use product::{NewProduct, Product};
pub use user::{NewUser, Role, User};

/// The five collections managed by the seed process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Companies,
    Locations,
    Products,
    Histories,
}

impl Collection {
    /// Dependency order: every collection only references collections before it
    pub const INSERT_ORDER: [Collection; 5] = [
        Collection::Users,
        Collection::Companies,
        Collection::Locations,
        Collection::Products,
        Collection::Histories,
    ];

    /// Reverse of the insert order, so no delete trips a foreign key
    pub const RESET_ORDER: [Collection; 5] = [
        Collection::Histories,
        Collection::Products,
        Collection::Locations,
        Collection::Companies,
        Collection::Users,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Companies => "companies",
            Collection::Locations => "locations",
            Collection::Products => "products",
            Collection::Histories => "histories",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

/// Per-collection record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionCounts {
    pub users: u64,
    pub companies: u64,
    pub locations: u64,
    pub products: u64,
    pub histories: u64,
}

impl CollectionCounts {
    pub fn get(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Users => self.users,
            Collection::Companies => self.companies,
            Collection::Locations => self.locations,
            Collection::Products => self.products,
            Collection::Histories => self.histories,
        }
    }

    pub fn set(&mut self, collection: Collection, count: u64) {
        match collection {
            Collection::Users => self.users = count,
            Collection::Companies => self.companies = count,
            Collection::Locations => self.locations = count,
            Collection::Products => self.products = count,
            Collection::Histories => self.histories = count,
        }
    }

    pub fn total(&self) -> u64 {
        self.users + self.companies + self.locations + self.products + self.histories
    }
}

/// Full contents of the five collections at one point in time
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub locations: Vec<Location>,
    pub products: Vec<Product>,
    pub histories: Vec<History>,
}

impl Snapshot {
    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            users: self.users.len() as u64,
            companies: self.companies.len() as u64,
            locations: self.locations.len() as u64,
            products: self.products.len() as u64,
            histories: self.histories.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_order_is_reverse_of_insert_order() {
        let mut reversed = Collection::INSERT_ORDER;
        reversed.reverse();
        assert_eq!(reversed, Collection::RESET_ORDER);
    }

    #[test]
    fn test_counts_get_set() {
        let mut counts = CollectionCounts::default();
        for (i, collection) in Collection::INSERT_ORDER.iter().enumerate() {
            counts.set(*collection, i as u64 + 1);
        }
        assert_eq!(counts.get(Collection::Histories), 5);
        assert_eq!(counts.total(), 15);
    }
}
