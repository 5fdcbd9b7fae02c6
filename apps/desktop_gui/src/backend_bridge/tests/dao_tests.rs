use crossbeam_channel::bounded;

use super::*;
use crate::backend_bridge::runtime::spawn_backend_thread;

fn bridge_for(database_url: &str) -> (BridgeProductoDao, std::thread::JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = bounded(16);
    let worker = spawn_backend_thread(database_url.to_string(), cmd_rx).expect("spawn worker");
    (BridgeProductoDao::new(cmd_tx), worker)
}

#[test]
fn saves_and_lists_through_worker_thread() {
    let (dao, worker) = bridge_for("sqlite::memory:");

    assert!(dao.listar_productos().expect("empty listing").is_empty());
    assert!(dao.guardar_producto_db(&Producto::nuevo(
        "Tornillo",
        "Acero",
        "Ferretería",
        0.15,
        500
    )));
    assert!(dao.guardar_producto_db(&Producto::nuevo("Tuerca", "", "Ferretería", 0.05, 80)));

    let productos = dao.listar_productos().expect("listing");
    let nombres: Vec<&str> = productos.iter().map(|p| p.nombre.as_str()).collect();
    assert_eq!(nombres, ["Tornillo", "Tuerca"]);
    assert!(productos.iter().all(|p| p.id.is_assigned()));

    drop(dao);
    worker.join().expect("worker exits once senders are gone");
}

#[test]
fn storage_startup_failure_is_reported_to_callers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, b"not a directory").expect("blocker file");
    let database_url = format!(
        "sqlite://{}/erp.db",
        blocker.to_string_lossy().replace('\\', "/")
    );
    let (dao, worker) = bridge_for(&database_url);

    let err = dao.listar_productos().expect_err("storage unavailable");
    assert!(err.to_string().contains("backend worker startup failure"));
    assert!(!dao.guardar_producto_db(&Producto::nuevo("X", "", "", 1.0, 1)));

    drop(dao);
    worker.join().expect("worker exits");
}

#[test]
fn disconnected_worker_maps_to_errors() {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
    drop(cmd_rx);
    let dao = BridgeProductoDao::new(cmd_tx);

    assert!(dao.listar_productos().is_err());
    assert!(!dao.guardar_producto_db(&Producto::nuevo("X", "", "", 1.0, 1)));
}
