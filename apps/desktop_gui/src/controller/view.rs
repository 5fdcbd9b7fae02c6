//! Producto form controller: form text, action selector, display list and the modal alert.

use anyhow::Result;
use shared::{
    domain::{AccionProducto, Producto},
    error::FormError,
    form::ProductoForm,
};

use crate::controller::{
    dao::ProductoDao,
    observable::{ListChange, ObservableList},
    table::{TableColumn, PRODUCTO_COLUMNS},
};

pub const TITULO_DATOS_INVALIDOS: &str = "Datos inválidos";
pub const MENSAJE_DATOS_INVALIDOS: &str = "Revisa los campos: precio y stock deben ser numéricos.";
pub const TITULO_FALLO_GUARDADO: &str = "Error al guardar";
pub const MENSAJE_FALLO_GUARDADO: &str = "No se pudo guardar el producto. Inténtalo de nuevo.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alerta {
    pub titulo: String,
    pub mensaje: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    AlertaVisible,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Guardado,
    /// Storage answered `false`; list and form are left as they were.
    Rechazado,
    DatosInvalidos(FormError),
    /// An alert is still open, so the request was dropped.
    Bloqueado,
}

type AccionHook = Box<dyn FnMut(AccionProducto)>;

pub struct ProductoViewController<D> {
    dao: D,
    form: ProductoForm,
    accion: AccionProducto,
    productos: ObservableList<Producto>,
    columnas: Vec<TableColumn>,
    alerta: Option<Alerta>,
    alertar_fallo_guardado: bool,
    on_cambiar_accion: Option<AccionHook>,
}

impl<D: ProductoDao> ProductoViewController<D> {
    pub fn new(dao: D) -> Self {
        Self {
            dao,
            form: ProductoForm::default(),
            accion: AccionProducto::default(),
            productos: ObservableList::new(),
            columnas: Vec::new(),
            alerta: None,
            alertar_fallo_guardado: false,
            on_cambiar_accion: None,
        }
    }

    pub fn with_alertar_fallo_guardado(mut self, enabled: bool) -> Self {
        self.alertar_fallo_guardado = enabled;
        self
    }

    /// Called after every selector change. Nothing runs by default.
    pub fn on_cambiar_accion(&mut self, hook: impl FnMut(AccionProducto) + 'static) {
        self.on_cambiar_accion = Some(Box::new(hook));
    }

    pub fn subscribe_productos(&mut self, listener: impl FnMut(ListChange) + 'static) {
        self.productos.subscribe(listener);
    }

    /// Binds the table columns and loads the full listing. DAO faults are returned untouched.
    pub fn initialize(&mut self) -> Result<()> {
        self.columnas = PRODUCTO_COLUMNS.to_vec();
        let productos = self.dao.listar_productos()?;
        tracing::info!(count = productos.len(), "productos loaded");
        self.productos.set_all(productos);
        Ok(())
    }

    pub fn insertar_producto(&mut self) -> InsertOutcome {
        if self.alerta.is_some() {
            tracing::debug!("insert ignored while an alert is open");
            return InsertOutcome::Bloqueado;
        }

        let producto = match self.form.to_producto() {
            Ok(producto) => producto,
            Err(err) => {
                tracing::warn!(field = err.field(), "rejected producto form: {err}");
                self.mostrar_alerta(TITULO_DATOS_INVALIDOS, MENSAJE_DATOS_INVALIDOS);
                return InsertOutcome::DatosInvalidos(err);
            }
        };

        if !self.dao.guardar_producto_db(&producto) {
            tracing::warn!(nombre = %producto.nombre, "storage did not persist producto");
            if self.alertar_fallo_guardado {
                self.mostrar_alerta(TITULO_FALLO_GUARDADO, MENSAJE_FALLO_GUARDADO);
            }
            return InsertOutcome::Rechazado;
        }

        tracing::info!(nombre = %producto.nombre, "producto saved");
        // The stored id is not read back; the row keeps id 0 until the next load.
        self.productos.push(producto);
        self.limpiar_campos();
        InsertOutcome::Guardado
    }

    pub fn cambiar_accion(&mut self, seleccion: AccionProducto) {
        self.accion = seleccion;
        tracing::debug!(accion = seleccion.label(), "action selected");
        if let Some(hook) = self.on_cambiar_accion.as_mut() {
            hook(seleccion);
        }
    }

    pub fn limpiar_campos(&mut self) {
        self.form.clear();
    }

    pub fn mostrar_alerta(&mut self, titulo: &str, mensaje: &str) {
        self.alerta = Some(Alerta {
            titulo: titulo.to_string(),
            mensaje: mensaje.to_string(),
        });
    }

    pub fn cerrar_alerta(&mut self) {
        self.alerta = None;
    }

    pub fn state(&self) -> ViewState {
        if self.alerta.is_some() {
            ViewState::AlertaVisible
        } else {
            ViewState::Idle
        }
    }

    pub fn alerta(&self) -> Option<&Alerta> {
        self.alerta.as_ref()
    }

    pub fn form(&self) -> &ProductoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductoForm {
        &mut self.form
    }

    pub fn accion(&self) -> AccionProducto {
        self.accion
    }

    pub fn productos(&self) -> &[Producto] {
        self.productos.items()
    }

    pub fn columnas(&self) -> &[TableColumn] {
        &self.columnas
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
