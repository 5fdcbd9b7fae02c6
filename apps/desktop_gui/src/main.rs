mod backend_bridge;
mod config;
mod controller;
mod ui;

use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{commands::BackendCommand, dao::BridgeProductoDao, runtime::spawn_backend_thread},
    controller::view::ProductoViewController,
    ui::ProductoApp,
};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = config::load_settings();
    tracing::info!(database_url = %settings.database_url, "starting producto desktop");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    // A missing worker surfaces as a load error in the window, not as a crash here.
    if let Err(err) = spawn_backend_thread(settings.database_url.clone(), cmd_rx) {
        tracing::error!("{err:#}");
    }
    let dao = BridgeProductoDao::new(cmd_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window_title.clone())
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    let title = settings.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let controller = ProductoViewController::new(dao)
                .with_alertar_fallo_guardado(settings.alertar_fallo_guardado);
            Ok(Box::new(ProductoApp::new(&cc.egui_ctx, controller)))
        }),
    )
}
