use std::collections::HashMap;

use crate::types::Product;

/// Products last fetched for a list, keyed by id, in the order the server
/// returned them.
#[derive(Debug, Clone)]
pub struct ProductCache {
    order: Vec<String>,
    entries: HashMap<String, Product>,
    stale: bool,
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductCache {
    /// An empty cache that has never been filled.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            stale: true,
        }
    }

    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.order.clear();
        self.entries.clear();
        for product in products {
            if self.entries.contains_key(&product.id) {
                continue;
            }
            self.order.push(product.id.clone());
            self.entries.insert(product.id.clone(), product);
        }
        self.stale = false;
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.entries.get(id)
    }

    /// Replaces the entry in place when the id is cached, otherwise appends it.
    pub fn upsert(&mut self, product: Product) {
        if !self.entries.contains_key(&product.id) {
            self.order.push(product.id.clone());
        }
        self.entries.insert(product.id.clone(), product);
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let removed = self.entries.remove(id)?;
        self.order.retain(|entry| entry != id);
        Some(removed)
    }

    /// Drops every entry; the next read must come from the server.
    pub fn invalidate(&mut self) {
        self.order.clear();
        self.entries.clear();
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}
