//! Backend commands queued from UI to backend worker.

use anyhow::Result;
use crossbeam_channel::Sender;
use shared::domain::{Producto, ProductoId};

pub enum BackendCommand {
    ListProductos {
        reply: Sender<Result<Vec<Producto>>>,
    },
    GuardarProducto {
        producto: Producto,
        reply: Sender<Result<ProductoId>>,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ListProductos { .. } => "list_productos",
            BackendCommand::GuardarProducto { .. } => "guardar_producto",
        }
    }
}
