use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Repository trait for Product persistence
///
/// Implementations assign ids and keep the bookkeeping timestamps; callers
/// only ever see whole products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest id first
    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert a product under a freshly assigned id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Persist every field of an existing product
    async fn save(&self, product: Product) -> ProductResult<Product>;

    async fn delete(&self, product: Product) -> ProductResult<()>;
}

#[derive(Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// Process-local repository. Ids increase monotonically and are not reused
/// after deletion.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Database("product id sequence exhausted".to_string()))?;
        store.last_id = id;

        let now = Utc::now();
        let product = Product {
            id,
            name: input.name,
            price: input.price,
            available: input.available,
            created_at: now,
            updated_at: now,
        };
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let existing = store
            .products
            .get_mut(&product.id)
            .ok_or_else(|| ProductError::NotFound(product.id.to_string()))?;

        product.created_at = existing.created_at;
        product.updated_at = Utc::now();
        *existing = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, product: Product) -> ProductResult<()> {
        let mut store = self.store.write().await;
        store
            .products
            .remove(&product.id)
            .ok_or_else(|| ProductError::NotFound(product.id.to_string()))?;

        tracing::info!(product_id = product.id, "Deleted product");
        Ok(())
    }
}
