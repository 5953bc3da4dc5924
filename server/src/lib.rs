//! REST API for the product catalog.
//!
//! Five handlers under `/api/products` map list/get/create/update/delete onto
//! a `ProductStore`. Request bodies are validated before the store is touched;
//! unknown ids answer 404 whatever their shape.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use model::{Category, CreateProduct, Product, UpdateProduct};
pub use store::{MemoryStore, ProductStore, StoreError};

pub type Store = Arc<dyn ProductStore>;

/// Router backed by a fresh in-memory store.
pub fn app() -> Router {
    router(Arc::new(MemoryStore::new()))
}

pub fn router(store: Store) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Arc::new(MemoryStore::new())).await
}

pub async fn serve(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, router(store)).await
}

async fn list_products(State(store): State<Store>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(store.list().await?))
}

async fn get_product(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = store.get(&id).await?;
    product.map(Json).ok_or(ApiError::NotFound(id))
}

async fn create_product(
    State(store): State<Store>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = body?;
    let product = store.insert(input.validate()?).await?;
    tracing::info!(id = %product.id, name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(store): State<Store>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProduct>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let patch = match body.map_err(ApiError::from).and_then(|Json(input)| input.validate()) {
        Ok(patch) => patch,
        // an unknown id is reported as such even when the body is invalid
        Err(err) => match store.get(&id).await? {
            Some(_) => return Err(err),
            None => return Err(ApiError::NotFound(id)),
        },
    };
    let updated = store.update(&id, patch).await?;
    let product = updated.ok_or(ApiError::NotFound(id))?;
    tracing::info!(id = %product.id, "product updated");
    Ok(Json(product))
}

async fn delete_product(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !store.delete(&id).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(%id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
