use thiserror::Error;

/// Field-level rejection raised while turning raw form text into a [`crate::domain::Producto`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("precio must be numeric, got {0:?}")]
    PrecioInvalido(String),
    #[error("stock must be an integer, got {0:?}")]
    StockInvalido(String),
}

impl FormError {
    pub fn field(&self) -> &'static str {
        match self {
            FormError::PrecioInvalido(_) => "precio",
            FormError::StockInvalido(_) => "stock",
        }
    }
}
