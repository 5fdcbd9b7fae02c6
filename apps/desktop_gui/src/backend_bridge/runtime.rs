//! Worker thread: tokio runtime + storage, serving [`BackendCommand`]s until every sender is gone.

use std::thread;

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::Receiver;
use storage::{ProductoRepository, Storage};

use crate::backend_bridge::commands::BackendCommand;

pub fn spawn_backend_thread(
    database_url: String,
    cmd_rx: Receiver<BackendCommand>,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("erp-backend".into())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::error!("failed to build backend runtime: {err}");
                    reject_all(
                        &cmd_rx,
                        &format!("backend worker startup failure: failed to build runtime: {err}"),
                    );
                    return;
                }
            };

            runtime.block_on(async move {
                let opened = match Storage::new(&database_url).await {
                    Ok(storage) => storage.health_check().await.map(|()| storage),
                    Err(err) => Err(err),
                };
                match opened {
                    Ok(storage) => {
                        tracing::info!(database_url = %database_url, "backend worker ready");
                        serve_commands(&storage, &cmd_rx).await;
                    }
                    Err(err) => {
                        tracing::error!("backend worker could not open storage: {err:#}");
                        reject_all(
                            &cmd_rx,
                            &format!("backend worker startup failure: {err:#}"),
                        );
                    }
                }
            });
            tracing::debug!("backend worker stopped");
        })
        .context("failed to spawn backend worker thread")
}

pub async fn serve_commands<R: ProductoRepository + ?Sized>(
    repo: &R,
    cmd_rx: &Receiver<BackendCommand>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend command received");
        match cmd {
            BackendCommand::ListProductos { reply } => {
                let _ = reply.send(repo.list_productos().await);
            }
            BackendCommand::GuardarProducto { producto, reply } => {
                let _ = reply.send(repo.insert_producto(&producto).await);
            }
        }
    }
}

// Keeps answering so callers see the startup cause instead of a bare disconnect.
fn reject_all(cmd_rx: &Receiver<BackendCommand>, reason: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::ListProductos { reply } => {
                let _ = reply.send(Err(anyhow!("{reason}")));
            }
            BackendCommand::GuardarProducto { reply, .. } => {
                let _ = reply.send(Err(anyhow!("{reason}")));
            }
        }
    }
}
