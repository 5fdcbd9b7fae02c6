use anyhow::Result;
use shared::domain::Producto;

/// Data access the view controller depends on. Calls block the caller until storage answers.
pub trait ProductoDao {
    /// Full snapshot of stored productos, in storage order.
    fn listar_productos(&self) -> Result<Vec<Producto>>;

    /// `true` once the row is persisted. The assigned id is not reported back.
    fn guardar_producto_db(&self, producto: &Producto) -> bool;
}
