//! Product records and the request bodies that create or modify them.
//!
//! Request bodies are deserialized leniently (missing optional fields take
//! defaults) and then validated into `NewProduct` / `ProductPatch`, which are
//! the only shapes the store accepts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Packaging form of a product. No other value is accepted on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Garrafa,
    Pack,
    Botella,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Garrafa => "garrafa",
            Category::Pack => "pack",
            Category::Botella => "botella",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    pub category: Category,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<Category>,
}

/// A validated product that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: Category,
}

/// A validated partial update. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<Category>,
}

impl CreateProduct {
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        Ok(NewProduct {
            name: validate_name(self.name)?,
            description: self.description,
            price: validate_price(self.price)?,
            stock: validate_stock(self.stock)?,
            category: self.category,
        })
    }
}

impl UpdateProduct {
    pub fn validate(self) -> Result<ProductPatch, ApiError> {
        Ok(ProductPatch {
            name: self.name.map(validate_name).transpose()?,
            description: self.description,
            price: self.price.map(validate_price).transpose()?,
            stock: self.stock.map(validate_stock).transpose()?,
            category: self.category,
        })
    }
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
    }
}

fn validate_name(name: String) -> Result<String, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }
    Ok(name)
}

fn validate_price(price: f64) -> Result<f64, ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(price)
}

fn validate_stock(stock: i64) -> Result<u32, ApiError> {
    u32::try_from(stock).map_err(|_| {
        ApiError::Validation(format!("stock must be a non-negative integer, got {stock}"))
    })
}
