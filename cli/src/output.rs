//! Table and JSON output for CLI commands.

use agua_core::Product;
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[derive(Debug, Tabled)]
pub struct ProductRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Nombre")]
    pub name: String,
    #[tabled(rename = "Descripción")]
    pub description: String,
    #[tabled(rename = "Precio")]
    pub price: String,
    #[tabled(rename = "Stock")]
    pub stock: u32,
    #[tabled(rename = "Categoría")]
    pub category: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            stock: product.stock,
            category: product.category.label(),
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn print_products<'a>(products: impl Iterator<Item = &'a Product>, format: OutputFormat) {
    let products: Vec<&Product> = products.collect();
    match format {
        OutputFormat::Table => {
            if products.is_empty() {
                println!("No hay productos.");
            } else {
                let rows: Vec<ProductRow> = products.into_iter().map(ProductRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => print_json(&products),
    }
}

pub fn print_product(product: &Product, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", product.name);
            print_kv("ID", &product.id);
            print_kv("Categoría", &product.category.label());
            print_kv("Descripción", &product.description);
            print_kv("Precio", &format_price(product.price));
            print_kv("Stock", &format!("{} unidades", product.stock));
            print_kv("Creado", &product.created_at.format("%d/%m/%Y").to_string());
            print_kv("Actualizado", &product.updated_at.format("%d/%m/%Y").to_string());
        }
        OutputFormat::Json => print_json(product),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = %err, "failed to encode output"),
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

fn print_kv(key: &str, value: &str) {
    println!("  {:<14} {}", format!("{key}:"), value);
}
