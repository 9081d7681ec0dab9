//! Locations domain methods on PgStore

use sqlx::{Postgres, QueryBuilder};

use super::PgStore;
use crate::{
    error::AppResult,
    models::location::{Location, NewLocation},
};

impl PgStore<'_> {
    pub async fn locations_insert_many(&mut self, locations: &[NewLocation]) -> AppResult<u64> {
        if locations.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO locations (id, name, description, created_by) ");
        builder.push_values(locations, |mut row, location| {
            row.push_bind(location.id)
                .push_bind(&location.name)
                .push_bind(&location.description)
                .push_bind(location.created_by);
        });

        let result = builder.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    pub async fn locations_list(&mut self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, Location>(
            "SELECT id, name, description, created_by, created_at FROM locations ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
