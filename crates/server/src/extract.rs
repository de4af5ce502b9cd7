use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::async_trait;
use models::errors::{FieldViolation, ModelError};
use models::product::{self, ParsedInt, ProductInput};
use serde_json::Value;

use crate::errors::ApiError;

/// Request body decoded as JSON.
///
/// A missing `Content-Type` is read as JSON. A declared non-JSON type, an
/// empty body and malformed JSON are all 422 at `["body"]`.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().map(is_json_content_type).unwrap_or(false));
        let bytes = Bytes::from_request(req, state).await?;

        if declared_json == Some(false) {
            return Err(ApiError::Validation(vec![FieldViolation::new(
                "model_attributes_type",
                &["body"],
                "Input should be a valid dictionary or object",
            )
            .with_input(String::from_utf8_lossy(&bytes).into_owned())]));
        }
        if bytes.is_empty() {
            return Err(ApiError::Validation(vec![FieldViolation::new("missing", &["body"], "Field required")]));
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(JsonBody(value)),
            Err(_) => Err(ApiError::Validation(vec![FieldViolation::new(
                "json_invalid",
                &["body"],
                "JSON decode error",
            )])),
        }
    }
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// JSON body checked against the product input shape before the handler runs.
pub struct ProductPayload(pub ProductInput);

#[async_trait]
impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::from_request(req, state).await?;
        let input = product::validate_payload(&value)?;
        Ok(ProductPayload(input))
    }
}

/// Read the `{id}` path segment.
///
/// `Ok(None)` is a well-formed integer outside the id column's range; no row
/// can carry it.
pub fn product_id(raw: &str) -> Result<Option<i32>, FieldViolation> {
    match product::parse_int_text(raw) {
        ParsedInt::Value(id) => Ok(Some(id)),
        ParsedInt::OutOfRange => Ok(None),
        ParsedInt::NotInteger => Err(FieldViolation::new("int_parsing", &["path", "id"], product::INT_PARSING_MSG)
            .with_input(raw.to_string())),
    }
}

/// Validate the path id and the body of an update together, so a request
/// with both wrong reports every violation in one 422.
pub fn update_request(raw_id: &str, body: &Value) -> Result<(Option<i32>, ProductInput), ApiError> {
    match (product_id(raw_id), product::validate_payload(body)) {
        (Ok(id), Ok(input)) => Ok((id, input)),
        (id, input) => {
            let mut violations: Vec<FieldViolation> = id.err().into_iter().collect();
            if let Err(ModelError::Validation(body)) = input {
                violations.extend(body);
            }
            Err(ApiError::Validation(violations))
        }
    }
}
