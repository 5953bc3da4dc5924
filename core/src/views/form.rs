use thiserror::Error;

use crate::service::ProductService;
use crate::types::{Category, CreateProduct, Product, UpdateProduct};
use crate::views::{Navigation, SAVE_FAILED};

/// Reasons a draft cannot be sent. The messages are shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("El nombre del producto es obligatorio")]
    EmptyName,
    #[error("Precio inválido: {0}")]
    InvalidPrice(String),
    #[error("Stock inválido: {0}")]
    InvalidStock(String),
}

/// Field values as typed into the form. Numbers stay text until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: Category,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: "0".to_string(),
            stock: "0".to_string(),
            category: Category::Garrafa,
        }
    }
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category,
        }
    }

    fn parsed_name(&self) -> Result<String, DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        Ok(self.name.clone())
    }

    fn parsed_price(&self) -> Result<f64, DraftError> {
        let text = self.price.trim();
        match text.parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
            _ => Err(DraftError::InvalidPrice(text.to_string())),
        }
    }

    fn parsed_stock(&self) -> Result<u32, DraftError> {
        let text = self.stock.trim();
        text.parse::<u32>()
            .map_err(|_| DraftError::InvalidStock(text.to_string()))
    }

    pub fn to_create(&self) -> Result<CreateProduct, DraftError> {
        Ok(CreateProduct {
            name: self.parsed_name()?,
            description: self.description.clone(),
            price: self.parsed_price()?,
            stock: self.parsed_stock()?,
            category: self.category,
        })
    }

    /// Only the fields that differ from `original`.
    pub fn changes_from(&self, original: &Product) -> Result<UpdateProduct, DraftError> {
        let name = self.parsed_name()?;
        let price = self.parsed_price()?;
        let stock = self.parsed_stock()?;

        Ok(UpdateProduct {
            name: (name != original.name).then_some(name),
            description: (self.description != original.description)
                .then(|| self.description.clone()),
            price: (price != original.price).then_some(price),
            stock: (stock != original.stock).then_some(stock),
            category: (self.category != original.category).then_some(self.category),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the product with this id.
    Edit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing,
    Saved(Product),
}

/// The create/edit form. It has no loading state of its own: the draft is
/// seeded synchronously and only `submit` talks to the service.
#[derive(Debug, Clone)]
pub struct FormView {
    mode: FormMode,
    original: Option<Product>,
    draft: ProductDraft,
    phase: FormPhase,
    alert: Option<String>,
}

impl FormView {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            original: None,
            draft: ProductDraft::default(),
            phase: FormPhase::Editing,
            alert: None,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit(product.id.clone()),
            original: Some(product.clone()),
            draft: ProductDraft::from_product(product),
            phase: FormPhase::Editing,
            alert: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    /// The alert raised by the last failed submit.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validates the draft and sends it. On success the phase becomes
    /// `Saved` and the caller should navigate back; on failure the draft is
    /// kept and an alert is raised so the user can retry.
    pub fn submit(&mut self, service: &impl ProductService) -> Navigation {
        self.alert = None;

        let result = match (&self.mode, &self.original) {
            (FormMode::Edit(id), Some(original)) => match self.draft.changes_from(original) {
                Ok(changes) => Ok(service.update(id, &changes)),
                Err(err) => Err(err),
            },
            _ => match self.draft.to_create() {
                Ok(input) => Ok(service.create(&input)),
                Err(err) => Err(err),
            },
        };

        match result {
            Ok(Ok(product)) => {
                tracing::info!(id = %product.id, "product saved");
                self.original = Some(product.clone());
                self.phase = FormPhase::Saved(product);
                Navigation::Back
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "failed to save product");
                self.alert = Some(SAVE_FAILED.to_string());
                self.phase = FormPhase::Editing;
                Navigation::Stay
            }
            Err(invalid) => {
                self.alert = Some(invalid.to_string());
                self.phase = FormPhase::Editing;
                Navigation::Stay
            }
        }
    }
}
