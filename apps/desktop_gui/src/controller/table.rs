use std::fmt;

use shared::domain::Producto;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Decimal(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Decimal(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Clone, Copy)]
pub struct TableColumn {
    pub header: &'static str,
    pub cell: fn(&Producto) -> CellValue,
}

impl TableColumn {
    pub fn render(&self, producto: &Producto) -> CellValue {
        (self.cell)(producto)
    }
}

impl fmt::Debug for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

// descripcion is captured by the form but has no column.
pub const PRODUCTO_COLUMNS: [TableColumn; 5] = [
    TableColumn {
        header: "ID",
        cell: |p| CellValue::Integer(p.id.0),
    },
    TableColumn {
        header: "Nombre",
        cell: |p| CellValue::Text(p.nombre.clone()),
    },
    TableColumn {
        header: "Categoría",
        cell: |p| CellValue::Text(p.categoria.clone()),
    },
    TableColumn {
        header: "Precio",
        cell: |p| CellValue::Decimal(p.precio_unitario),
    },
    TableColumn {
        header: "Stock",
        cell: |p| CellValue::Integer(i64::from(p.stock)),
    },
];
