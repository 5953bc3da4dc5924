use std::sync::Arc;

use agua_server::{
    app,
    model::{NewProduct, ProductPatch},
    router, MemoryStore, Product, ProductStore, StoreError,
};
use async_trait::async_trait;
use axum::{
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create(app: &Router, body: &str) -> Product {
    let resp = send(app, json_request("POST", "/api/products", body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

const AGUA: &str = r#"{"name":"Agua 20L","description":"Garrafa retornable","price":5.50,"stock":10,"category":"garrafa"}"#;

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let resp = send(&app(), empty_request("GET", "/api/products")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_products_returns_every_product() {
    let app = app();
    let first = create(&app, AGUA).await;
    let second = create(&app, r#"{"name":"Pack 6x2L","price":12,"stock":4,"category":"pack"}"#).await;

    let resp = send(&app, empty_request("GET", "/api/products")).await;
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 2);
    assert!(products.iter().any(|p| p.id == first.id));
    assert!(products.iter().any(|p| p.id == second.id));
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201_with_assigned_fields() {
    let resp = send(&app(), json_request("POST", "/api/products", AGUA)).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json: serde_json::Value = body_json(resp).await;
    assert!(!json["_id"].as_str().unwrap().is_empty());
    assert_eq!(json["price"], 5.5);
    assert_eq!(json["stock"], 10);
    assert_eq!(json["category"], "garrafa");
    assert_eq!(json["createdAt"], json["updatedAt"]);
}

#[tokio::test]
async fn create_product_rejects_invalid_values() {
    let resp = send(
        &app(),
        json_request(
            "POST",
            "/api/products",
            r#"{"name":"","price":-1,"stock":-5,"category":"garrafa"}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_product_rejects_unknown_category() {
    let resp = send(
        &app(),
        json_request("POST", "/api/products", r#"{"name":"Lata","category":"lata"}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_product_with_malformed_json_is_a_validation_error() {
    let resp = send(&app(), json_request("POST", "/api/products", "{\"name\":")).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_create_stores_nothing() {
    let app = app();
    send(
        &app,
        json_request("POST", "/api/products", r#"{"name":" ","category":"pack"}"#),
    )
    .await;

    let resp = send(&app, empty_request("GET", "/api/products")).await;
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

// --- get ---

#[tokio::test]
async fn get_product_not_found() {
    let resp = send(&app(), empty_request("GET", "/api/products/64b7f0c2a1e4d3b2c1a09f8e")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn get_product_arbitrary_id_is_not_found() {
    let resp = send(&app(), empty_request("GET", "/api/products/not-an-id")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- update ---

#[tokio::test]
async fn update_product_not_found() {
    let resp = send(
        &app(),
        json_request("PUT", "/api/products/missing", r#"{"stock":3}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_product_with_invalid_body_is_not_found() {
    let resp = send(
        &app(),
        json_request("PUT", "/api/products/missing", r#"{"price":-3}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_product_with_undecodable_body_is_not_found() {
    let app = app();
    for body in [
        r#"{"category":"lata"}"#,
        r#"{"stock":1.5}"#,
        r#"{"price":"x"}"#,
        "not json",
    ] {
        let resp = send(&app, json_request("PUT", "/api/products/missing", body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "body {body}");
        let json: serde_json::Value = body_json(resp).await;
        assert_eq!(json["error"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn update_product_with_undecodable_body_is_a_validation_error() {
    let app = app();
    let created = create(&app, AGUA).await;
    let uri = format!("/api/products/{}", created.id);

    for body in [r#"{"category":"lata"}"#, r#"{"stock":1.5}"#, "not json"] {
        let resp = send(&app, json_request("PUT", &uri, body)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        let json: serde_json::Value = body_json(resp).await;
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert!(!json["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn update_product_rejects_negative_stock() {
    let app = app();
    let created = create(&app, AGUA).await;

    let resp = send(
        &app,
        json_request("PUT", &format!("/api/products/{}", created.id), r#"{"stock":-1}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&app, empty_request("GET", &format!("/api/products/{}", created.id))).await;
    let fetched: Product = body_json(resp).await;
    assert_eq!(fetched.stock, 10);
}

// --- delete ---

#[tokio::test]
async fn delete_product_not_found() {
    let resp = send(&app(), empty_request("DELETE", "/api/products/missing")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- store failures ---

struct BrokenStore;

#[async_trait]
impl ProductStore for BrokenStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _id: &str) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn insert(&self, _input: NewProduct) -> Result<Product, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _id: &str, _patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn store_failure_returns_500_without_details() {
    let app = router(Arc::new(BrokenStore));

    let resp = send(&app, empty_request("GET", "/api/products")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("connection refused"));

    let resp = send(&app, empty_request("DELETE", "/api/products/any")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = router(Arc::new(MemoryStore::new()));

    // create
    let created = create(&app, AGUA).await;
    assert_eq!(created.name, "Agua 20L");
    assert_eq!(created.created_at, created.updated_at);
    let id = created.id.clone();

    // list contains the new product
    let resp = send(&app, empty_request("GET", "/api/products")).await;
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, id);

    // get returns exactly what create returned
    let resp = send(&app, empty_request("GET", &format!("/api/products/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Product = body_json(resp).await;
    assert_eq!(fetched, created);

    // update price only
    let resp = send(
        &app,
        json_request("PUT", &format!("/api/products/{id}"), r#"{"price":6.25}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.price, 6.25);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.stock, created.stock);
    assert_eq!(updated.category, created.category);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > updated.created_at);

    // update stock only
    let resp = send(
        &app,
        json_request("PUT", &format!("/api/products/{id}"), r#"{"stock":0}"#),
    )
    .await;
    let updated: Product = body_json(resp).await;
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.name, "Agua 20L");
    assert_eq!(updated.price, 6.25);

    // delete
    let resp = send(&app, empty_request("DELETE", &format!("/api/products/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = send(&app, empty_request("GET", &format!("/api/products/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again
    let resp = send(&app, empty_request("DELETE", &format!("/api/products/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = send(&app, empty_request("GET", "/api/products")).await;
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}
