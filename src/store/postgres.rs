use super::{ProductStore, Result, StoreError};
use async_trait::async_trait;
use productos_types::{NewProduct, ProductRecord};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const COLUMNS: &str = "id, name, reference, price, weight, category, stock";

/// PostgreSQL implementation of ProductStore
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let migration_sql = include_str!("../../migrations/001_init.sql");

        sqlx::raw_sql(migration_sql).execute(&self.pool).await?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

/// Maps a row to a record. Nullable columns fall back to empty text or zero.
fn product_from_row(row: &PgRow) -> Result<ProductRecord> {
    Ok(ProductRecord {
        id: row.try_get("id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        reference: row.try_get::<Option<String>, _>("reference")?.unwrap_or_default(),
        price: row.try_get::<Option<f64>, _>("price")?.unwrap_or_default(),
        weight: row.try_get::<Option<f64>, _>("weight")?.unwrap_or_default(),
        category: row.try_get::<Option<String>, _>("category")?.unwrap_or_default(),
        stock: row.try_get::<Option<i32>, _>("stock")?.unwrap_or_default(),
    })
}

/// Builds a `%term%` ILIKE pattern, escaping the LIKE wildcards in `term`.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn list(&self) -> Result<Vec<ProductRecord>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn create(&self, product: NewProduct) -> Result<ProductRecord> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, reference, price, weight, category, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(&product.reference)
        .bind(product.price)
        .bind(product.weight)
        .bind(&product.category)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        let record = product_from_row(&row)?;
        tracing::info!("Product {} created", record.id);
        Ok(record)
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<ProductRecord> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE products
            SET name = $2, reference = $3, price = $4, weight = $5, category = $6, stock = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&product.name)
        .bind(&product.reference)
        .bind(product.price)
        .bind(product.weight)
        .bind(&product.category)
        .bind(product.stock)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => product_from_row(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!("Product {} deleted", id);
        Ok(())
    }

    async fn search(&self, term: &str) -> Result<Option<ProductRecord>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS} FROM products
            WHERE name ILIKE $1 OR reference ILIKE $1 OR category ILIKE $1
            ORDER BY id
            LIMIT 1
            "#
        ))
        .bind(contains_pattern(term))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(product_from_row).transpose()
    }
}
