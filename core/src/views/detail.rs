use crate::service::ProductService;
use crate::types::Product;
use crate::views::{
    FormView, Navigation, ViewPhase, DELETE_FAILED, LOAD_PRODUCT_FAILED, PRODUCT_NOT_FOUND,
};

/// The detail screen for one product id.
#[derive(Debug, Clone)]
pub struct DetailView {
    id: String,
    phase: ViewPhase,
    product: Option<Product>,
}

impl DetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phase: ViewPhase::Loading,
            product: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    /// The loaded product; `None` unless the phase is `Ready`.
    pub fn product(&self) -> Option<&Product> {
        match self.phase {
            ViewPhase::Ready => self.product.as_ref(),
            _ => None,
        }
    }

    pub fn load(&mut self, service: &impl ProductService) {
        self.phase = ViewPhase::Loading;
        match service.get(&self.id) {
            Ok(product) => {
                self.product = Some(product);
                self.phase = ViewPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "failed to load product");
                self.product = None;
                let message = if err.is_not_found() {
                    PRODUCT_NOT_FOUND
                } else {
                    LOAD_PRODUCT_FAILED
                };
                self.phase = ViewPhase::Error(message.to_string());
            }
        }
    }

    pub fn delete(&mut self, service: &impl ProductService) -> Navigation {
        match service.delete(&self.id) {
            Ok(()) => {
                tracing::info!(id = %self.id, "product deleted");
                Navigation::Back
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "failed to delete product");
                self.phase = ViewPhase::Error(DELETE_FAILED.to_string());
                Navigation::Stay
            }
        }
    }

    /// A form seeded with the loaded product.
    pub fn edit(&self) -> Option<FormView> {
        self.product().map(FormView::edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::{product, FakeCatalog};
    use crate::views::FormMode;

    #[test]
    fn load_existing_product() {
        let catalog = FakeCatalog::with(vec![product("a", "Agua 20L")]);
        let mut view = DetailView::new("a");
        assert_eq!(view.id(), "a");
        assert!(view.product().is_none());

        view.load(&catalog);
        assert_eq!(view.phase(), &ViewPhase::Ready);
        assert_eq!(view.product().map(|p| p.name.as_str()), Some("Agua 20L"));
    }

    #[test]
    fn missing_product_and_failure_get_different_messages() {
        let catalog = FakeCatalog::default();
        let mut view = DetailView::new("missing");
        view.load(&catalog);
        assert_eq!(view.phase().error_message(), Some(PRODUCT_NOT_FOUND));

        catalog.offline.set(true);
        view.load(&catalog);
        assert_eq!(view.phase().error_message(), Some(LOAD_PRODUCT_FAILED));
    }

    #[test]
    fn delete_navigates_back() {
        let catalog = FakeCatalog::with(vec![product("a", "A")]);
        let mut view = DetailView::new("a");
        view.load(&catalog);
        assert_eq!(view.delete(&catalog), Navigation::Back);
        assert!(catalog.products.borrow().is_empty());
    }

    #[test]
    fn failed_delete_stays_with_error() {
        let catalog = FakeCatalog::with(vec![product("a", "A")]);
        let mut view = DetailView::new("a");
        view.load(&catalog);
        catalog.offline.set(true);
        assert_eq!(view.delete(&catalog), Navigation::Stay);
        assert_eq!(view.phase().error_message(), Some(DELETE_FAILED));
    }

    #[test]
    fn edit_requires_loaded_product() {
        let catalog = FakeCatalog::with(vec![product("a", "Agua 20L")]);
        let mut view = DetailView::new("a");
        assert!(view.edit().is_none());

        view.load(&catalog);
        let form = view.edit().unwrap();
        assert_eq!(form.mode(), &FormMode::Edit("a".to_string()));
        assert_eq!(form.draft().name, "Agua 20L");
    }
}
