use crate::error::ApiError;
use crate::service::ProductService;
use crate::types::Product;
use crate::views::{ProductCache, ViewPhase, DELETE_FAILED, LOAD_PRODUCTS_FAILED};

/// The product list screen.
///
/// Data is fetched only on `load`; `on_focus` is the caller's signal that
/// the screen became visible again (initially, or after returning from a
/// child screen) and throws the cached list away first.
#[derive(Debug, Clone)]
pub struct ListView {
    phase: ViewPhase,
    cache: ProductCache,
    notice: Option<String>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            phase: ViewPhase::Loading,
            cache: ProductCache::new(),
            notice: None,
        }
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.cache.iter()
    }

    pub fn cache(&self) -> &ProductCache {
        &self.cache
    }

    /// A message shown above the list without replacing it.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn on_focus(&mut self) {
        self.cache.invalidate();
        self.phase = ViewPhase::Loading;
        self.notice = None;
    }

    pub fn load(&mut self, service: &impl ProductService) {
        self.phase = ViewPhase::Loading;
        match service.list() {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product list loaded");
                self.cache.replace_all(products);
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load products");
                self.cache.invalidate();
                self.phase = ViewPhase::Error(LOAD_PRODUCTS_FAILED.to_string());
            }
        }
    }

    /// `on_focus` followed by `load`.
    pub fn refresh(&mut self, service: &impl ProductService) {
        self.on_focus();
        self.load(service);
    }

    /// Applies a product the form just saved so the list shows it without
    /// waiting for the next fetch.
    pub fn record_saved(&mut self, product: Product) {
        tracing::debug!(id = %product.id, "saved product applied to list");
        self.cache.upsert(product);
        self.notice = None;
    }

    /// Deletes a product and drops it from the cached list. A failure leaves
    /// the list as it was and sets the notice.
    pub fn delete(&mut self, service: &impl ProductService, id: &str) -> Result<(), ApiError> {
        match service.delete(id) {
            Ok(()) => {
                self.cache.remove(id);
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to delete product");
                self.notice = Some(DELETE_FAILED.to_string());
                Err(err)
            }
        }
    }
}
