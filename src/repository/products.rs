//! Products domain methods on PgStore

use sqlx::{Postgres, QueryBuilder};

use super::PgStore;
use crate::{
    error::AppResult,
    models::product::{NewProduct, Product},
};

impl PgStore<'_> {
    /// Insert a batch of products in one statement
    pub async fn products_insert_many(&mut self, products: &[NewProduct]) -> AppResult<u64> {
        if products.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            r#"
            INSERT INTO products (id, title, description, serial_no, created_by, manufacturer,
                                  model, date_of_purchase, warranty_months, user_label)
            "#,
        );
        builder.push_values(products, |mut row, product| {
            row.push_bind(product.id)
                .push_bind(&product.title)
                .push_bind(&product.description)
                .push_bind(&product.serial_no)
                .push_bind(product.created_by)
                .push_bind(product.manufacturer)
                .push_bind(&product.model)
                .push_bind(product.date_of_purchase)
                .push_bind(product.warranty_months)
                .push_bind(&product.user_label);
        });

        let result = builder.build().execute(&mut *self.conn).await?;
        Ok(result.rows_affected())
    }

    /// List all products
    pub async fn products_list(&mut self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, title, description, serial_no, created_by, manufacturer,
                   model, date_of_purchase, warranty_months, user_label, created_at
            FROM products
            ORDER BY serial_no
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }
}
