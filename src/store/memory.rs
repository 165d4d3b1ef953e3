use super::{ProductStore, Result, StoreError, matches_term};
use async_trait::async_trait;
use productos_types::{NewProduct, ProductRecord};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    last_id: i64,
    products: BTreeMap<i64, ProductRecord>,
}

/// Product store kept in process memory. Used by tests and by the
/// `memory` database backend.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records; later ids continue after the highest one.
    pub fn with_products(products: impl IntoIterator<Item = ProductRecord>) -> Self {
        let products: BTreeMap<i64, ProductRecord> =
            products.into_iter().map(|p| (p.id, p)).collect();
        let last_id = products.keys().next_back().copied().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { last_id, products }),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.inner.read().await.products.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<ProductRecord>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<ProductRecord> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let record = ProductRecord::from_new(inner.last_id, product);
        inner.products.insert(record.id, record.clone());
        tracing::debug!("Stored product {} in memory", record.id);
        Ok(record)
    }

    async fn update(&self, id: i64, product: NewProduct) -> Result<ProductRecord> {
        let mut inner = self.inner.write().await;
        let slot = inner.products.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = ProductRecord::from_new(id, product);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner
            .write()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, term: &str) -> Result<Option<ProductRecord>> {
        let needle = term.to_lowercase();
        Ok(self
            .inner
            .read()
            .await
            .products
            .values()
            .find(|p| matches_term(p, &needle))
            .cloned())
    }
}
