use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductoId);

impl ProductoId {
    /// Sentinel for a record that storage has not assigned an id to yet.
    pub const NUEVO: ProductoId = ProductoId(0);

    pub fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: ProductoId,
    pub nombre: String,
    pub descripcion: String,
    pub categoria: String,
    pub precio_unitario: f64,
    pub stock: i32,
}

impl Producto {
    pub fn nuevo(
        nombre: impl Into<String>,
        descripcion: impl Into<String>,
        categoria: impl Into<String>,
        precio_unitario: f64,
        stock: i32,
    ) -> Self {
        Self {
            id: ProductoId::NUEVO,
            nombre: nombre.into(),
            descripcion: descripcion.into(),
            categoria: categoria.into(),
            precio_unitario,
            stock,
        }
    }

    pub fn with_id(mut self, id: ProductoId) -> Self {
        self.id = id;
        self
    }
}

/// Entries of the action selector shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccionProducto {
    #[default]
    AnadirProducto,
    ModificarProducto,
    EliminarProducto,
}

impl AccionProducto {
    pub const ALL: [AccionProducto; 3] = [
        AccionProducto::AnadirProducto,
        AccionProducto::ModificarProducto,
        AccionProducto::EliminarProducto,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccionProducto::AnadirProducto => "Añadir producto",
            AccionProducto::ModificarProducto => "Modificar producto",
            AccionProducto::EliminarProducto => "Eliminar producto",
        }
    }
}
