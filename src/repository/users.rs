//! Users domain methods on PgStore

use sqlx::{Postgres, QueryBuilder};

use super::PgStore;
use crate::{
    error::AppResult,
    models::user::{NewUser, User},
};

impl PgStore<'_> {
    /// Insert a batch of users in one statement
    pub async fn users_insert_many(&mut self, users: &[NewUser]) -> AppResult<u64> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO users (id, name, email, password_hash, role) ");
        builder.push_values(users, |mut row, user| {
            row.push_bind(user.id)
                .push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(&user.password_hash)
                .push_bind(user.role);
        });

        let result = builder.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// List all users
    pub async fn users_list(&mut self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, role, created_at FROM users ORDER BY email",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
