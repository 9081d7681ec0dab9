//! Repository layer for database operations
//!
//! The seed process talks to its store through [`SeedStore`]. Two stores
//! implement it: [`PgStore`], which runs on a single PostgreSQL connection
//! (or inside a transaction), and [`memory::MemoryStore`], used for dry
//! runs and tests.

pub mod companies;
pub mod histories;
pub mod locations;
pub mod memory;
pub mod products;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{pool::PoolConnection, postgres::PgPoolOptions, PgConnection, Pool, Postgres, Transaction};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
    models::{Collection, NewCompany, NewHistory, NewLocation, NewProduct, NewUser, Snapshot},
};

/// Operations the seed process needs from a store.
///
/// Insert methods take a whole batch and either store all of it or fail.
/// They return the number of records written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedStore: Send {
    /// Delete every record of a collection, returning how many were removed
    async fn clear(&mut self, collection: Collection) -> AppResult<u64>;

    async fn insert_users(&mut self, users: &[NewUser]) -> AppResult<u64>;

    async fn insert_companies(&mut self, companies: &[NewCompany]) -> AppResult<u64>;

    async fn insert_locations(&mut self, locations: &[NewLocation]) -> AppResult<u64>;

    async fn insert_products(&mut self, products: &[NewProduct]) -> AppResult<u64>;

    async fn insert_histories(&mut self, histories: &[NewHistory]) -> AppResult<u64>;

    async fn count(&mut self, collection: Collection) -> AppResult<u64>;

    /// Read the five collections in full
    async fn snapshot(&mut self) -> AppResult<Snapshot>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open the pool and check the database answers
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn acquire(&self) -> AppResult<PoolConnection<Postgres>> {
        Ok(self.pool.acquire().await?)
    }

    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }
}

/// PostgreSQL store bound to one connection.
///
/// Works on a plain pooled connection as well as on an open transaction,
/// since both dereference to [`PgConnection`].
pub struct PgStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

/// Check that a batch insert wrote every row it was given
fn expect_rows(collection: Collection, expected: usize, written: u64) -> AppResult<u64> {
    if written != expected as u64 {
        return Err(AppError::Internal(format!(
            "Inserted {} {} instead of {}",
            written, collection, expected
        )));
    }
    Ok(written)
}

#[async_trait]
impl SeedStore for PgStore<'_> {
    async fn clear(&mut self, collection: Collection) -> AppResult<u64> {
        let query = format!("DELETE FROM {}", collection.table_name());
        let result = sqlx::query(&query).execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    async fn insert_users(&mut self, users: &[NewUser]) -> AppResult<u64> {
        let written = self.users_insert_many(users).await?;
        expect_rows(Collection::Users, users.len(), written)
    }

    async fn insert_companies(&mut self, companies: &[NewCompany]) -> AppResult<u64> {
        let written = self.companies_insert_many(companies).await?;
        expect_rows(Collection::Companies, companies.len(), written)
    }

    async fn insert_locations(&mut self, locations: &[NewLocation]) -> AppResult<u64> {
        let written = self.locations_insert_many(locations).await?;
        expect_rows(Collection::Locations, locations.len(), written)
    }

    async fn insert_products(&mut self, products: &[NewProduct]) -> AppResult<u64> {
        let written = self.products_insert_many(products).await?;
        expect_rows(Collection::Products, products.len(), written)
    }

    async fn insert_histories(&mut self, histories: &[NewHistory]) -> AppResult<u64> {
        let written = self.histories_insert_many(histories).await?;
        expect_rows(Collection::Histories, histories.len(), written)
    }

    async fn count(&mut self, collection: Collection) -> AppResult<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", collection.table_name());
        let count: i64 = sqlx::query_scalar(&query).fetch_one(&mut *self.conn).await?;
        Ok(count as u64)
    }

    async fn snapshot(&mut self) -> AppResult<Snapshot> {
        Ok(Snapshot {
            users: self.users_list().await?,
            companies: self.companies_list().await?,
            locations: self.locations_list().await?,
            products: self.products_list().await?,
            histories: self.histories_list().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_rows() {
        assert_eq!(expect_rows(Collection::Users, 5, 5).unwrap(), 5);
        assert!(matches!(
            expect_rows(Collection::Users, 5, 4),
            Err(AppError::Internal(_))
        ));
    }
}
