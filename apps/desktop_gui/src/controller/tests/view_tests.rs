use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use anyhow::anyhow;
use shared::domain::ProductoId;

use super::*;
use crate::controller::table::CellValue;

#[derive(Default)]
struct FakeDao {
    stored: RefCell<Vec<Producto>>,
    rejects_saves: Cell<bool>,
    listing_fails: Cell<bool>,
    save_calls: Cell<usize>,
}

impl FakeDao {
    fn seeded(productos: Vec<Producto>) -> Rc<Self> {
        let dao = Rc::new(Self::default());
        *dao.stored.borrow_mut() = productos;
        dao
    }
}

impl ProductoDao for Rc<FakeDao> {
    fn listar_productos(&self) -> Result<Vec<Producto>> {
        if self.listing_fails.get() {
            return Err(anyhow!("database is locked"));
        }
        Ok(self.stored.borrow().clone())
    }

    fn guardar_producto_db(&self, producto: &Producto) -> bool {
        self.save_calls.set(self.save_calls.get() + 1);
        if self.rejects_saves.get() {
            return false;
        }
        let mut stored = self.stored.borrow_mut();
        let id = ProductoId(stored.len() as i64 + 1);
        stored.push(producto.clone().with_id(id));
        true
    }
}

fn catalogo() -> Vec<Producto> {
    vec![
        Producto::nuevo("Martillo", "Mango de madera", "Herramientas", 12.5, 8).with_id(ProductoId(1)),
        Producto::nuevo("Clavo", "", "Ferretería", 0.02, 10_000).with_id(ProductoId(2)),
        Producto::nuevo("Brocha", "5 cm", "Pintura", 3.75, 40).with_id(ProductoId(3)),
    ]
}

fn fill_form(controller: &mut ProductoViewController<Rc<FakeDao>>, precio: &str, stock: &str) {
    let form = controller.form_mut();
    form.nombre = "Tornillo".into();
    form.descripcion = "Acero".into();
    form.categoria = "Ferretería".into();
    form.precio = precio.into();
    form.stock = stock.into();
}

fn ready_controller(dao: &Rc<FakeDao>) -> ProductoViewController<Rc<FakeDao>> {
    let mut controller = ProductoViewController::new(Rc::clone(dao));
    controller.initialize().expect("initialize");
    controller
}

#[test]
fn initialize_mirrors_dao_listing_in_order() {
    let dao = FakeDao::seeded(catalogo());
    let controller = ready_controller(&dao);

    assert_eq!(controller.productos(), catalogo().as_slice());
    assert_eq!(controller.columnas().len(), 5);
    assert_eq!(controller.state(), ViewState::Idle);
}

#[test]
fn initialize_binds_columns_to_producto_accessors() {
    let dao = FakeDao::seeded(catalogo());
    let controller = ready_controller(&dao);

    let headers: Vec<&str> = controller.columnas().iter().map(|c| c.header).collect();
    assert_eq!(headers, ["ID", "Nombre", "Categoría", "Precio", "Stock"]);
    let first_row = &controller.productos()[0];
    assert_eq!(
        controller.columnas()[1].render(first_row),
        CellValue::Text("Martillo".into())
    );
}

#[test]
fn initialize_propagates_listing_failure() {
    let dao = FakeDao::seeded(catalogo());
    dao.listing_fails.set(true);
    let mut controller = ProductoViewController::new(Rc::clone(&dao));

    let err = controller.initialize().expect_err("listing fails");
    assert!(err.to_string().contains("locked"));
    assert!(controller.productos().is_empty());
}

#[test]
fn saved_producto_is_appended_with_unassigned_id_and_form_cleared() {
    let dao = FakeDao::seeded(catalogo());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "0.15", "500");

    assert_eq!(controller.insertar_producto(), InsertOutcome::Guardado);

    assert_eq!(controller.productos().len(), 4);
    let added = controller.productos().last().expect("new row");
    assert_eq!(added.id, ProductoId::NUEVO);
    assert_eq!(added.nombre, "Tornillo");
    assert_eq!(added.descripcion, "Acero");
    assert_eq!(added.categoria, "Ferretería");
    assert_eq!(added.precio_unitario, 0.15);
    assert_eq!(added.stock, 500);
    assert_eq!(controller.form(), &ProductoForm::default());
    assert!(controller.alerta().is_none());
    // storage has its own id for the row; the display copy is not refreshed
    assert_eq!(dao.stored.borrow().last().map(|p| p.id), Some(ProductoId(4)));
}

#[test]
fn reload_after_insert_picks_up_assigned_id() {
    let dao = FakeDao::seeded(catalogo());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "0.15", "500");
    controller.insertar_producto();

    controller.initialize().expect("reload");
    assert_eq!(controller.productos().last().map(|p| p.id), Some(ProductoId(4)));
}

#[test]
fn non_numeric_price_shows_single_alert_and_changes_nothing() {
    let dao = FakeDao::seeded(catalogo());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "abc", "500");
    let before = controller.form().clone();

    let outcome = controller.insertar_producto();

    assert_eq!(
        outcome,
        InsertOutcome::DatosInvalidos(FormError::PrecioInvalido("abc".into()))
    );
    assert_eq!(controller.productos().len(), 3);
    assert_eq!(controller.form(), &before);
    assert_eq!(dao.save_calls.get(), 0);
    assert_eq!(controller.state(), ViewState::AlertaVisible);
    assert_eq!(
        controller.alerta(),
        Some(&Alerta {
            titulo: TITULO_DATOS_INVALIDOS.into(),
            mensaje: MENSAJE_DATOS_INVALIDOS.into(),
        })
    );
}

#[test]
fn non_numeric_stock_is_rejected_like_price() {
    let dao = FakeDao::seeded(Vec::new());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "1.0", "muchos");

    let outcome = controller.insertar_producto();

    assert!(matches!(
        outcome,
        InsertOutcome::DatosInvalidos(FormError::StockInvalido(_))
    ));
    assert!(controller.productos().is_empty());
    assert_eq!(controller.form().stock, "muchos");
    assert_eq!(
        controller.alerta().map(|a| a.titulo.as_str()),
        Some("Datos inválidos")
    );
}

#[test]
fn open_alert_blocks_inserts_until_dismissed() {
    let dao = FakeDao::seeded(Vec::new());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "abc", "1");
    controller.insertar_producto();

    controller.form_mut().precio = "2.5".into();
    assert_eq!(controller.insertar_producto(), InsertOutcome::Bloqueado);
    assert_eq!(dao.save_calls.get(), 0);

    controller.cerrar_alerta();
    assert_eq!(controller.state(), ViewState::Idle);
    assert_eq!(controller.insertar_producto(), InsertOutcome::Guardado);
    assert_eq!(controller.productos().len(), 1);
}

#[test]
fn rejected_save_is_silent_by_default() {
    let dao = FakeDao::seeded(catalogo());
    dao.rejects_saves.set(true);
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "0.15", "500");
    let before = controller.form().clone();

    assert_eq!(controller.insertar_producto(), InsertOutcome::Rechazado);

    assert_eq!(dao.save_calls.get(), 1);
    assert_eq!(controller.productos().len(), 3);
    assert_eq!(controller.form(), &before);
    assert!(controller.alerta().is_none());
}

#[test]
fn rejected_save_alerts_when_enabled() {
    let dao = FakeDao::seeded(Vec::new());
    dao.rejects_saves.set(true);
    let mut controller =
        ProductoViewController::new(Rc::clone(&dao)).with_alertar_fallo_guardado(true);
    controller.initialize().expect("initialize");
    fill_form(&mut controller, "0.15", "500");

    controller.insertar_producto();

    assert_eq!(
        controller.alerta().map(|a| a.titulo.as_str()),
        Some(TITULO_FALLO_GUARDADO)
    );
    assert!(controller.productos().is_empty());
}

#[test]
fn limpiar_campos_twice_leaves_fields_empty() {
    let dao = FakeDao::seeded(Vec::new());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "1", "1");

    controller.limpiar_campos();
    assert_eq!(controller.form(), &ProductoForm::default());
    controller.limpiar_campos();
    assert_eq!(controller.form(), &ProductoForm::default());
}

#[test]
fn list_subscribers_observe_load_and_insert() {
    let dao = FakeDao::seeded(catalogo());
    let changes = Rc::new(RefCell::new(Vec::new()));
    let mut controller = ProductoViewController::new(Rc::clone(&dao));
    let sink = Rc::clone(&changes);
    controller.subscribe_productos(move |change| sink.borrow_mut().push(change));

    controller.initialize().expect("initialize");
    fill_form(&mut controller, "0.15", "500");
    controller.insertar_producto();

    assert_eq!(
        *changes.borrow(),
        vec![
            ListChange::Replaced { len: 3 },
            ListChange::Added { index: 3 }
        ]
    );
}

#[test]
fn cambiar_accion_records_selection_and_runs_hook() {
    let dao = FakeDao::seeded(Vec::new());
    let mut controller = ready_controller(&dao);
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    controller.on_cambiar_accion(move |accion| sink.borrow_mut().push(accion));

    controller.cambiar_accion(AccionProducto::ModificarProducto);
    controller.cambiar_accion(AccionProducto::AnadirProducto);

    assert_eq!(controller.accion(), AccionProducto::AnadirProducto);
    assert_eq!(
        *calls.borrow(),
        vec![
            AccionProducto::ModificarProducto,
            AccionProducto::AnadirProducto
        ]
    );
}

#[test]
fn cambiar_accion_without_hook_has_no_side_effects() {
    let dao = FakeDao::seeded(catalogo());
    let mut controller = ready_controller(&dao);
    fill_form(&mut controller, "1", "1");
    let before = controller.form().clone();

    controller.cambiar_accion(AccionProducto::EliminarProducto);

    assert_eq!(controller.form(), &before);
    assert_eq!(controller.productos().len(), 3);
    assert_eq!(controller.state(), ViewState::Idle);
}
