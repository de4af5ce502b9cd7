use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::product::{ProductRepository, ProductService, SeaOrmProductRepository};

/// Application context shared by all handlers. Built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub products: ProductService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: ProductService::new(repo) }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmProductRepository::new(db)))
    }
}
