mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PostgresProductStore;

use async_trait::async_trait;
use productos_types::{NewProduct, ProductRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product not found with id: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence for products.
///
/// `list` and `search` order by id; ids are assigned by the store on `create`
/// and never change afterwards.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, ordered by id. May be empty.
    async fn list(&self) -> Result<Vec<ProductRecord>>;

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>>;

    async fn create(&self, product: NewProduct) -> Result<ProductRecord>;

    /// Replaces every field of product `id`; fails with `NotFound` when absent.
    async fn update(&self, id: i64, product: NewProduct) -> Result<ProductRecord>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// The lowest-id product whose name, reference or category contains
    /// `term`, ignoring case.
    async fn search(&self, term: &str) -> Result<Option<ProductRecord>>;
}

pub(crate) fn matches_term(product: &ProductRecord, needle: &str) -> bool {
    [&product.name, &product.reference, &product.category]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
