//! Raw text state of the producto form and its conversion into a [`Producto`].

use crate::{domain::Producto, error::FormError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductoForm {
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub precio: String,
    pub stock: String,
}

impl ProductoForm {
    /// Builds a new, unsaved producto. Price and stock are both checked before anything is built.
    pub fn to_producto(&self) -> Result<Producto, FormError> {
        let precio = parse_precio(&self.precio)?;
        let stock = parse_stock(&self.stock)?;
        Ok(Producto::nuevo(
            self.nombre.clone(),
            self.descripcion.clone(),
            self.categoria.clone(),
            precio,
            stock,
        ))
    }

    pub fn clear(&mut self) {
        self.nombre.clear();
        self.descripcion.clear();
        self.categoria.clear();
        self.precio.clear();
        self.stock.clear();
    }
}

/// Leading and trailing ASCII control characters and spaces are ignored. NaN and infinities are rejected.
pub fn parse_precio(raw: &str) -> Result<f64, FormError> {
    match raw.trim_matches(|c: char| c <= ' ').parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FormError::PrecioInvalido(raw.to_string())),
    }
}

/// The text must be an optionally signed decimal integer that fits in `i32`, with no padding.
pub fn parse_stock(raw: &str) -> Result<i32, FormError> {
    raw.parse::<i32>()
        .map_err(|_| FormError::StockInvalido(raw.to_string()))
}
