//! History domain methods on PgStore

use sqlx::{types::Json, Postgres, QueryBuilder};

use super::PgStore;
use crate::{
    error::AppResult,
    models::history::{History, NewHistory},
};

impl PgStore<'_> {
    /// Insert a batch of history records in one statement
    pub async fn histories_insert_many(&mut self, histories: &[NewHistory]) -> AppResult<u64> {
        if histories.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO histories (id, location, status) ");
        builder.push_values(histories, |mut row, history| {
            row.push_bind(history.id)
                .push_bind(history.location)
                .push_bind(Json(&history.status));
        });

        let result = builder.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// List all history records
    pub async fn histories_list(&mut self) -> AppResult<Vec<History>> {
        let rows = sqlx::query_as::<_, History>(
            "SELECT id, location, status, created_at FROM histories ORDER BY created_at, id",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
