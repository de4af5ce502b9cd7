use std::sync::Arc;
use models::product::{self, ProductInput};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

const ENTITY: &str = "Product";

/// Application service in front of a [`ProductRepository`].
/// Turns every absence signal into [`ServiceError::NotFound`].
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = created.id, "product_created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: ProductInput) -> Result<product::Model, ServiceError> {
        let updated = self.repo.update(id, input).await?;
        info!(id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(id, "product_deleted");
        Ok(())
    }
}
