//! In-process product store for handler and service tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use models::product::{self, ProductInput};
use tokio::sync::Mutex;

use crate::errors::ServiceError;
use crate::product::ProductRepository;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, product::Model>,
}

/// Ids start at 1 and are never reused, like a serial column.
#[derive(Default)]
pub struct MemoryProductRepository {
    table: Mutex<Table>,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<product::Model>, ServiceError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let model = input.into_model(table.last_id);
        table.rows.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, input: ProductInput) -> Result<product::Model, ServiceError> {
        let mut table = self.table.lock().await;
        let row = table.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("Product"))?;
        *row = input.into_model(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}
