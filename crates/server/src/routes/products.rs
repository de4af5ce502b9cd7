use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use common::types::Message;
use models::product;
use service::errors::ServiceError;
use tracing::info;

use crate::{
    errors::ApiError,
    extract::{self, JsonBody, ProductPayload},
    state::ServerState,
};

/// The raw `{id}` segment; integer parsing happens in [`resolve_id`].
type RawId = WithRejection<Path<String>, ApiError>;

/// A non-integer id is a 422. An integer that cannot fit the id column names
/// no stored row, so it is a 404 like any other unknown id.
fn resolve_id(raw: &str) -> Result<i32, ApiError> {
    extract::product_id(raw)
        .map_err(|v| ApiError::Validation(vec![v]))?
        .ok_or_else(|| ServiceError::not_found("Product").into())
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<product::Model>>, ApiError> {
    let products = state.products.list().await?;
    info!(count = products.len(), "list products");
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid id", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(raw), _): RawId,
) -> Result<Json<product::Model>, ApiError> {
    let id = resolve_id(&raw)?;
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ProductPayload(input): ProductPayload,
) -> Result<(StatusCode, Json<product::Model>), ApiError> {
    let created = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(raw), _): RawId,
    JsonBody(body): JsonBody,
) -> Result<Json<product::Model>, ApiError> {
    let (id, input) = extract::update_request(&raw, &body)?;
    let id = id.ok_or_else(|| ApiError::from(ServiceError::not_found("Product")))?;
    Ok(Json(state.products.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid id", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(raw), _): RawId,
) -> Result<Json<Message>, ApiError> {
    let id = resolve_id(&raw)?;
    state.products.delete(id).await?;
    Ok(Json(Message::new("Product deleted successfully")))
}
