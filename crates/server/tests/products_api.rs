//! Handler tests for the product API.
//!
//! The router runs exactly as in production except for storage, which is the
//! in-memory repository, so these tests need no database.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use configs::CorsConfig;
use server::{routes, startup::build_cors, state::ServerState};
use service::memory::MemoryProductRepository;

fn app() -> Router {
    let state = ServerState::new(Arc::new(MemoryProductRepository::default()));
    routes::build_router(state, build_cors(&CorsConfig::default()).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn pen() -> Value {
    json!({"name": "Pen", "description": "Blue ink", "price": 2, "quantity": 100})
}

#[tokio::test]
async fn root_greets() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Welcome to my page"}));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_returns_201_and_get_returns_same_body() {
    let app = app();
    let (status, created) = send(&app, Method::POST, "/products", Some(pen())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("integer id");
    assert_eq!(created["name"], "Pen");
    assert_eq!(created["description"], "Blue ink");
    assert_eq!(created["price"], 2);
    assert_eq!(created["quantity"], 100);

    let (status, fetched) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_every_created_product() {
    let app = app();
    let mut created = Vec::new();
    for i in 0..3 {
        let body = json!({"name": format!("item-{i}"), "description": "d", "price": i, "quantity": i * 10});
        let (status, product) = send(&app, Method::POST, "/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        created.push(product);
    }

    let (status, listed) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("array body");
    assert!(listed.len() >= created.len());
    for product in &created {
        assert!(listed.contains(product), "missing {product}");
    }
}

#[tokio::test]
async fn list_is_empty_array_without_products() {
    let app = app();
    let (status, listed) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/products", Some(pen())).await;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({"name": "Ink", "description": "Refill", "price": 7, "quantity": 0});
    let (status, updated) = send(&app, Method::PUT, &format!("/products/{id}"), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "name": "Ink", "description": "Refill", "price": 7, "quantity": 0}));

    let (_, fetched) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_requires_every_field() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/products", Some(pen())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::PUT, &format!("/products/{id}"), Some(json!({"price": 3}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"].as_array().unwrap().len(), 3);

    let (_, fetched) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn delete_confirms_and_removes() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/products", Some(pen())).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Product deleted successfully"}));

    let (status, body) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Product not found"}));
}

#[tokio::test]
async fn missing_id_is_404_for_get_update_and_delete() {
    let app = app();
    let not_found = json!({"detail": "Product not found"});

    let (status, body) = send(&app, Method::GET, "/products/999", None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));

    let (status, body) = send(&app, Method::PUT, "/products/999", Some(pen())).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));

    let (status, body) = send(&app, Method::DELETE, "/products/999", None).await;
    assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found));
}

#[tokio::test]
async fn create_with_missing_field_is_422_with_field_detail() {
    let app = app();
    let body = json!({"name": "Pen", "description": "Blue ink", "quantity": 100});
    let (status, body) = send(&app, Method::POST, "/products", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"detail": [{
            "type": "missing",
            "loc": ["body", "price"],
            "msg": "Field required",
            "input": {"name": "Pen", "description": "Blue ink", "quantity": 100}
        }]})
    );

    let (_, listed) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_with_mistyped_field_is_422() {
    let app = app();
    let body = json!({"name": "Pen", "description": "Blue ink", "price": "two", "quantity": 100});
    let (status, body) = send(&app, Method::POST, "/products", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_parsing");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "price"]));
    assert_eq!(body["detail"][0]["input"], "two");
}

#[tokio::test]
async fn numeric_string_fields_are_accepted() {
    let app = app();
    let body = json!({"name": "Pen", "description": "Blue ink", "price": "2", "quantity": "100"});
    let (status, created) = send(&app, Method::POST, "/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], 2);
    assert_eq!(created["quantity"], 100);
}

#[tokio::test]
async fn body_without_content_type_is_read_as_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .body(Body::from(pen().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn non_json_content_type_is_422() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(pen().to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (_, listed) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_json_is_422() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": pen}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/products/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_parsing");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
    assert_eq!(body["detail"][0]["input"], "abc");
}

#[tokio::test]
async fn id_beyond_integer_column_is_404() {
    let app = app();
    let not_found = json!({"detail": "Product not found"});

    for uri in ["/products/3000000000", "/products/-3000000000", "/products/123456789012345678901234567890"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found), "GET {uri}");

        let (status, body) = send(&app, Method::PUT, uri, Some(pen())).await;
        assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found), "PUT {uri}");

        let (status, body) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!((status, &body), (StatusCode::NOT_FOUND, &not_found), "DELETE {uri}");
    }
}

#[tokio::test]
async fn update_with_bad_id_and_bad_body_reports_both() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/products/abc", Some(json!({"name": "Pen", "description": "d", "price": 1}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<Value> = body["detail"].as_array().unwrap().iter().map(|v| v["loc"].clone()).collect();
    assert_eq!(locs, vec![json!(["path", "id"]), json!(["body", "quantity"])]);
}

#[tokio::test]
async fn update_with_oversized_id_and_bad_body_is_422() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/products/3000000000", Some(json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/products")
        .header(header::ORIGIN, "http://localhost:5500")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5500");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-custom-header");
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/products")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products/{id}"].is_object());
}
