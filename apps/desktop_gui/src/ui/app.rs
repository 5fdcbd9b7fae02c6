use eframe::egui;
use shared::domain::AccionProducto;

use crate::controller::{
    dao::ProductoDao,
    view::{InsertOutcome, ProductoViewController, ViewState},
};

pub struct ProductoApp<D> {
    controller: ProductoViewController<D>,
    load_error: Option<String>,
    status: String,
}

impl<D: ProductoDao> ProductoApp<D> {
    pub fn new(egui_ctx: &egui::Context, mut controller: ProductoViewController<D>) -> Self {
        let repaint_ctx = egui_ctx.clone();
        controller.subscribe_productos(move |change| {
            tracing::trace!(?change, "display list changed");
            repaint_ctx.request_repaint();
        });

        let mut app = Self {
            controller,
            load_error: None,
            status: String::new(),
        };
        app.load();
        app
    }

    fn load(&mut self) {
        match self.controller.initialize() {
            Ok(()) => {
                self.load_error = None;
                self.status = format!("{} productos", self.controller.productos().len());
            }
            Err(err) => {
                tracing::error!("failed to load productos: {err:#}");
                self.load_error = Some(format!("{err:#}"));
            }
        }
    }

    fn show_load_error(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.load_error.clone() else {
            return;
        };
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("No se pudieron cargar los productos");
            ui.add_space(8.0);
            ui.label(egui::RichText::new(message).color(ui.visuals().error_fg_color));
            ui.add_space(12.0);
            if ui.button("Reintentar").clicked() {
                self.load();
            }
        });
    }

    fn show_action_selector(&mut self, ui: &mut egui::Ui) {
        let mut seleccion = self.controller.accion();
        ui.horizontal(|ui| {
            ui.label("Acción");
            egui::ComboBox::from_id_salt("selector_accion")
                .selected_text(seleccion.label())
                .show_ui(ui, |ui| {
                    for accion in AccionProducto::ALL {
                        ui.selectable_value(&mut seleccion, accion, accion.label());
                    }
                });
        });
        if seleccion != self.controller.accion() {
            self.controller.cambiar_accion(seleccion);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let form = self.controller.form_mut();
        egui::Grid::new("producto_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                form_row(ui, "nombre_producto", "Nombre", &mut form.nombre);
                form_row(ui, "descripcion_producto", "Descripción", &mut form.descripcion);
                form_row(ui, "categoria_producto", "Categoría", &mut form.categoria);
                form_row(ui, "precio_producto", "Precio", &mut form.precio);
                form_row(ui, "stock_producto", "Stock", &mut form.stock);
            });

        ui.add_space(8.0);
        if ui.button("Insertar producto").clicked() {
            if let Some(status) = status_for_outcome(&self.controller.insertar_producto()) {
                self.status = status;
            }
        }
    }

    fn show_table(&self, ui: &mut egui::Ui) {
        let columnas = self.controller.columnas();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("tabla_productos")
                    .striped(true)
                    .num_columns(columnas.len())
                    .min_col_width(64.0)
                    .show(ui, |ui| {
                        for columna in columnas {
                            ui.strong(columna.header);
                        }
                        ui.end_row();

                        for producto in self.controller.productos() {
                            for columna in columnas {
                                ui.label(columna.render(producto).to_string());
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn show_alerta(&mut self, ctx: &egui::Context) {
        let Some(alerta) = self.controller.alerta().cloned() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("alerta_producto")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading(alerta.titulo.as_str());
            ui.add_space(6.0);
            ui.label(alerta.mensaje.as_str());
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.button("Aceptar").clicked()
            })
            .inner
        });

        if modal.inner || modal.should_close() {
            self.controller.cerrar_alerta();
        }
    }
}

fn status_for_outcome(outcome: &InsertOutcome) -> Option<String> {
    let status = match outcome {
        InsertOutcome::Guardado => "Producto guardado".to_string(),
        InsertOutcome::Rechazado => "El producto no se guardó".to_string(),
        InsertOutcome::DatosInvalidos(err) => {
            format!("Datos inválidos: revisa el campo {}", err.field())
        }
        InsertOutcome::Bloqueado => return None,
    };
    Some(status)
}

fn form_row(ui: &mut egui::Ui, id: &'static str, label: &str, value: &mut String) {
    ui.label(egui::RichText::new(label).strong());
    ui.add(
        egui::TextEdit::singleline(value)
            .id_salt(id)
            .desired_width(280.0),
    );
    ui.end_row();
}

impl<D: ProductoDao> eframe::App for ProductoApp<D> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(self.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("{} filas", self.controller.productos().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.load_error.is_some() {
                self.show_load_error(ui);
                return;
            }

            ui.heading("Productos");
            ui.add_space(6.0);
            self.show_action_selector(ui);
            ui.separator();
            let idle = self.controller.state() == ViewState::Idle;
            ui.add_enabled_ui(idle, |ui| self.show_form(ui));
            ui.separator();
            self.show_table(ui);
        });

        self.show_alerta(ctx);
    }
}
