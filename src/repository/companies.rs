//! Companies domain methods on PgStore

use sqlx::{Postgres, QueryBuilder};

use super::PgStore;
use crate::{
    error::AppResult,
    models::company::{Company, NewCompany},
};

impl PgStore<'_> {
    /// Insert a batch of companies in one statement
    pub async fn companies_insert_many(&mut self, companies: &[NewCompany]) -> AppResult<u64> {
        if companies.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO companies (id, name, description, created_by) ");
        builder.push_values(companies, |mut row, company| {
            row.push_bind(company.id)
                .push_bind(&company.name)
                .push_bind(&company.description)
                .push_bind(company.created_by);
        });

        let result = builder.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// List all companies
    pub async fn companies_list(&mut self) -> AppResult<Vec<Company>> {
        let rows = sqlx::query_as::<_, Company>(
            "SELECT id, name, description, created_by, created_at FROM companies ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
