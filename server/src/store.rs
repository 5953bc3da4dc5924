//! Product persistence.
//!
//! The API only talks to `ProductStore`; `MemoryStore` is the bundled
//! backend. The store owns identifier and timestamp assignment.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{NewProduct, Product, ProductPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, oldest first.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError>;

    async fn insert(&self, input: NewProduct) -> Result<Product, StoreError>;

    /// Returns `None` when no product has this id.
    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError>;

    /// Returns `false` when no product has this id.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `updatedAt` must move forward on every mutation, even within one millisecond.
fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn insert(&self, input: NewProduct) -> Result<Product, StoreError> {
        let created_at = now();
        let product = Product {
            id: Uuid::new_v4().simple().to_string(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category,
            created_at,
            updated_at: created_at,
        };
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(product);
        product.updated_at = next_update_time(product.updated_at);
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(id).is_some())
    }
}
