use async_trait::async_trait;
use models::product::{self, ProductInput};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Storage seam for products.
///
/// `get` and `delete` report absence through their return value; `update`
/// reports it as [`ServiceError::NotFound`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<product::Model>, ServiceError>;
    async fn create(&self, input: ProductInput) -> Result<product::Model, ServiceError>;
    async fn update(&self, id: i32, input: ProductInput) -> Result<product::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        crate::db::product_service::list_products(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
        crate::db::product_service::get_product(&self.db, id).await
    }

    async fn create(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        crate::db::product_service::create_product(&self.db, input).await
    }

    async fn update(&self, id: i32, input: ProductInput) -> Result<product::Model, ServiceError> {
        crate::db::product_service::update_product(&self.db, id, input).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        crate::db::product_service::delete_product(&self.db, id).await
    }
}
