//! Screen state for the catalog: a product list, a product detail and a
//! create/edit form.
//!
//! Each view owns its state and is driven by explicit calls (`load`,
//! `on_focus`, `submit`, ...) against a `ProductService`. Rendering is left
//! to the caller. Messages meant for the end user are in Spanish.

mod cache;
mod detail;
mod form;
mod list;

pub use cache::ProductCache;
pub use detail::DetailView;
pub use form::{DraftError, FormMode, FormPhase, FormView, ProductDraft};
pub use list::ListView;

pub const LOAD_PRODUCTS_FAILED: &str = "Error al cargar los productos";
pub const LOAD_PRODUCT_FAILED: &str = "Error al cargar el producto";
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const DELETE_FAILED: &str = "Error al eliminar el producto";
pub const SAVE_FAILED: &str =
    "Hubo un error al guardar el producto. Por favor, intente nuevamente.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Ready,
    /// Holds the message to display.
    Error(String),
}

impl ViewPhase {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What the caller should do with its navigation stack after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Back,
}
