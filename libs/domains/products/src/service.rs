//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges};
use crate::repository::ProductRepository;

/// Product service providing the catalog operations
///
/// Input is validated before the repository is touched, and every lookup by
/// id turns a missing row into [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product, newest id first
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Replace name, price and availability of an existing product
    #[instrument(skip(self, changes))]
    pub async fn update_product(&self, id: i32, changes: ProductChanges) -> ProductResult<Product> {
        changes.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_changes(changes);
        self.repository.save(product).await
    }

    /// Flip the availability flag and persist it
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.toggle_availability();
        self.repository.save(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let product = self.get_product(id).await?;
        self.repository.delete(product).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn product(id: i32, available: bool) -> Product {
        Product {
            id,
            name: "Monitor".to_string(),
            price: 300.0,
            available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_repository() {
        // No expectations: any repository call panics
        let service = ProductService::new(MockProductRepository::new());

        let err = service
            .create_product(NewProduct {
                name: "Monitor".to_string(),
                price: 0.0,
                available: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Validation(v) if v.len() == 1));
    }

    #[tokio::test]
    async fn test_create_passes_input_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.name == "Mouse" && input.available)
            .times(1)
            .returning(|input| {
                Ok(Product {
                    name: input.name,
                    price: input.price,
                    ..product(1, true)
                })
            });

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(NewProduct {
                name: "Mouse".to_string(),
                price: 50.0,
                available: true,
            })
            .await
            .unwrap();

        assert_eq!((created.id, created.price), (1, 50.0));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(1945))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(1945).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(id) if id == "1945"));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_save()
            .withf(|p| p.name == "Monitor Curvo" && p.price == 250.0 && !p.available)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service
            .update_product(
                2,
                ProductChanges {
                    name: "Monitor Curvo".to_string(),
                    price: 250.0,
                    available: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, 2);
    }

    #[tokio::test]
    async fn test_update_missing_product_never_saves() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(
                8,
                ProductChanges {
                    name: "x".to_string(),
                    price: 1.0,
                    available: true,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_flips_availability() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_save()
            .withf(|p| !p.available)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let toggled = service.toggle_availability(5).await.unwrap();

        assert!(!toggled.available);
    }

    #[tokio::test]
    async fn test_delete_removes_fetched_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, false))));
        mock_repo
            .expect_delete()
            .withf(|p| p.id == 3)
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        service.delete_product(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_errors_propagate() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list_all()
            .returning(|| Err(ProductError::Database("pool timed out".to_string())));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.list_products().await,
            Err(ProductError::Database(_))
        ));
    }
}
