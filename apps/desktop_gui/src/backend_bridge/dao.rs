use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use shared::domain::Producto;

use crate::{backend_bridge::commands::BackendCommand, controller::dao::ProductoDao};

/// [`ProductoDao`] that forwards each call to the backend worker and blocks for the answer.
#[derive(Clone)]
pub struct BridgeProductoDao {
    cmd_tx: Sender<BackendCommand>,
}

impl BridgeProductoDao {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self { cmd_tx }
    }

    fn request<T>(
        &self,
        build: impl FnOnce(Sender<Result<T>>) -> BackendCommand,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = bounded(1);
        let cmd = build(reply_tx);
        let cmd_name = cmd.name();
        self.cmd_tx.send(cmd).map_err(|_| {
            anyhow!("backend command processor disconnected before {cmd_name}")
        })?;
        tracing::debug!(command = cmd_name, "queued ui->backend command");
        reply_rx
            .recv()
            .map_err(|_| anyhow!("backend worker dropped the {cmd_name} reply"))?
    }
}

impl ProductoDao for BridgeProductoDao {
    fn listar_productos(&self) -> Result<Vec<Producto>> {
        self.request(|reply| BackendCommand::ListProductos { reply })
    }

    fn guardar_producto_db(&self, producto: &Producto) -> bool {
        let producto = producto.clone();
        match self.request(|reply| BackendCommand::GuardarProducto { producto, reply }) {
            Ok(id) => {
                tracing::debug!(id = id.0, "storage assigned producto id");
                true
            }
            Err(err) => {
                tracing::error!("failed to save producto: {err:#}");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/dao_tests.rs"]
mod tests;
