use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthDoc { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub description: String,
    pub price: i32,
    pub quantity: i32,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub detail: String }

#[derive(Serialize, ToSchema)]
pub struct FieldViolationDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    #[schema(value_type = Option<Object>)]
    pub input: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct ValidationErrorDoc { pub detail: Vec<FieldViolationDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthDoc,
            MessageDoc,
            ProductDoc,
            ProductInputDoc,
            ErrorDoc,
            FieldViolationDoc,
            ValidationErrorDoc,
        )
    ),
    tags(
        (name = "root"),
        (name = "health"),
        (name = "products", description = "Product CRUD")
    )
)]
pub struct ApiDoc;
