use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use models::product::{self, ProductInput};
use tracing::debug;
use crate::errors::ServiceError;

/// List every product, ordered by id.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let rows = product::Entity::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Get a product by id.
pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<Option<product::Model>, ServiceError> {
    Ok(product::Entity::find_by_id(id).one(db).await?)
}

/// Insert a product; the database assigns the id.
pub async fn create_product(db: &DatabaseConnection, input: ProductInput) -> Result<product::Model, ServiceError> {
    let am: product::ActiveModel = input.into();
    Ok(am.insert(db).await?)
}

/// Overwrite all mutable fields of an existing product.
///
/// Lookup and write share one transaction. It is committed on success; on any
/// early return the transaction is dropped and rolled back.
pub async fn update_product(db: &DatabaseConnection, id: i32, input: ProductInput) -> Result<product::Model, ServiceError> {
    let txn = db.begin().await?;
    let Some(existing) = product::Entity::find_by_id(id).one(&txn).await? else {
        return Err(ServiceError::not_found("Product"));
    };
    let mut am: product::ActiveModel = existing.into();
    input.apply_to(&mut am);
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    debug!(id, "product row overwritten");
    Ok(updated)
}

/// Delete a product; returns true if a row was removed.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = product::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
