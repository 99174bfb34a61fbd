//! eframe application: category tabs, product tables and the modal windows.

use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column, TableBuilder};

use crate::{
    category::Category,
    controller::{FormMode, Inventory},
    form::ProductForm,
    product::{Unit, DATE_FORMAT},
};

struct FormDialog {
    category: Category,
    mode: FormMode,
    form: ProductForm,
    error: Option<String>,
}

enum Dialog {
    Form(FormDialog),
    ConfirmDelete { category: Category, name: String },
    Warning(String),
}

pub struct InventoryApp {
    inventory: Inventory,
    active: Category,
    dialog: Option<Dialog>,
}

impl InventoryApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_styling(&cc.egui_ctx);
        Self {
            inventory: Inventory::new(),
            active: Category::Fruits,
            dialog: None,
        }
    }

    fn ui_tabs(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            for category in Category::all() {
                ui.selectable_value(&mut self.active, category, category.label());
            }
        });
    }

    fn ui_toolbar(&mut self, ui: &mut Ui) {
        let category = self.active;
        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                self.dialog = Some(Dialog::Form(FormDialog {
                    category,
                    mode: FormMode::Add,
                    form: ProductForm::default(),
                    error: None,
                }));
            }
            if ui.button("Edit").clicked() {
                self.dialog = Some(match self.inventory.begin_edit(category) {
                    Ok((mode, form)) => Dialog::Form(FormDialog {
                        category,
                        mode,
                        form,
                        error: None,
                    }),
                    Err(e) => Dialog::Warning(e.to_string()),
                });
            }
            if ui.button("Delete").clicked() {
                self.dialog = Some(match self.inventory.request_delete(category) {
                    Ok(name) => Dialog::ConfirmDelete { category, name },
                    Err(e) => Dialog::Warning(e.to_string()),
                });
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut filter = self.inventory.view(category).filter().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut filter)
                        .hint_text("name")
                        .desired_width(200.0),
                );
                if response.changed() {
                    self.inventory.set_filter(category, &filter);
                }
                ui.label("Search:");
            });
        });
    }

    fn ui_product_table(&mut self, ui: &mut Ui) {
        let category = self.active;
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size;
        let row_height = text_height * 1.8;
        let view = self.inventory.view(category);
        let rows = view.rows().to_vec();
        let mut selected = view.selected();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(150.0)) // Name
            .column(Column::initial(140.0).at_least(80.0)) // Brand
            .column(Column::initial(80.0).at_least(60.0)) // Quantity
            .column(Column::initial(80.0).at_least(60.0)) // Price
            .column(Column::initial(90.0).at_least(60.0)) // Weight
            .column(Column::initial(240.0).at_least(120.0)) // Expiration
            .min_scrolled_height(200.0)
            .header(text_height * 1.2, |mut header| {
                header.col(|ui| { ui.strong("Name"); });
                header.col(|ui| { ui.strong("Brand"); });
                header.col(|ui| { ui.strong("Quantity"); });
                header.col(|ui| { ui.strong("Price"); });
                header.col(|ui| { ui.strong("Weight"); });
                header.col(|ui| { ui.strong("Expiration"); });
            })
            .body(|mut body| {
                if rows.is_empty() {
                    body.row(row_height, |mut row| {
                        row.col(|ui| { ui.label("No products."); });
                        for _ in 0..5 { row.col(|_ui| {}); }
                    });
                    return;
                }
                for (index, product) in rows.iter().enumerate() {
                    body.row(row_height, |mut row| {
                        row.col(|ui| {
                            ui.selectable_value(&mut selected, Some(index), product.name.as_str());
                        });
                        row.col(|ui| { ui.label(product.brand.as_str()); });
                        row.col(|ui| { ui.label(product.quantity.as_str()); });
                        row.col(|ui| { ui.label(format!("${}", product.price)); });
                        row.col(|ui| { ui.label(product.weight.as_str()); });
                        row.col(|ui| { ui.label(product.expiration.as_str()); });
                    });
                }
            });

        if selected != self.inventory.view(category).selected() {
            self.inventory.select(category, selected);
        }
    }

    fn ui_summary(&self, ui: &mut Ui) {
        let summary = self.inventory.summary(self.active);
        egui::Grid::new("summary_table").num_columns(2).show(ui, |ui| {
            ui.label("Products:");
            ui.label(summary.products.to_string());
            ui.end_row();
            ui.label("Units:");
            ui.label(summary.units.to_string());
            ui.end_row();
            ui.label("Stock value:");
            ui.label(format!("${:.2}", summary.value));
            ui.end_row();
        });
    }

    fn ui_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        self.dialog = match dialog {
            Dialog::Form(form) => self.ui_form_window(ctx, form).map(Dialog::Form),
            Dialog::ConfirmDelete { category, name } => {
                self.ui_confirm_delete(ctx, category, name)
            }
            Dialog::Warning(message) => ui_warning(ctx, message).map(Dialog::Warning),
        };
    }

    /// Returns the dialog if it stays open.
    fn ui_form_window(
        &mut self,
        ctx: &egui::Context,
        mut dialog: FormDialog,
    ) -> Option<FormDialog> {
        let title = match dialog.mode {
            FormMode::Add => format!("Add product to {}", dialog.category.label()),
            FormMode::Edit { .. } => format!("Edit product in {}", dialog.category.label()),
        };
        let mut open = true;
        let mut save = false;
        let mut cancel = false;

        modal(&title).open(&mut open).show(ctx, |ui| {
            let form = &mut dialog.form;
            egui::Grid::new("product_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();
                    ui.label("Brand");
                    ui.text_edit_singleline(&mut form.brand);
                    ui.end_row();
                    ui.label("Quantity");
                    ui.text_edit_singleline(&mut form.quantity);
                    ui.end_row();
                    ui.label("Price");
                    ui.text_edit_singleline(&mut form.price);
                    ui.end_row();
                    ui.label("Weight");
                    ui.horizontal(|ui| {
                        ui.add(egui::TextEdit::singleline(&mut form.weight).desired_width(100.0));
                        egui::ComboBox::from_id_source("product_unit")
                            .selected_text(form.unit.symbol())
                            .show_ui(ui, |ui| {
                                for unit in Unit::all() {
                                    ui.selectable_value(&mut form.unit, unit, unit.symbol());
                                }
                            });
                    });
                    ui.end_row();
                    ui.label("Expires from");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.expires_from).hint_text(date_hint()),
                    );
                    ui.end_row();
                    ui.label("Expires to");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.expires_to).hint_text(date_hint()),
                    );
                    ui.end_row();
                });

            if let Some(error) = &dialog.error {
                ui.add_space(6.0);
                ui.colored_label(Color32::RED, error.as_str());
            }
            ui.separator();
            ui.horizontal(|ui| {
                save = ui.button("Save").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

        if cancel || !open {
            return None;
        }
        if !save {
            return Some(dialog);
        }
        match self.inventory.submit(dialog.category, &dialog.mode, &dialog.form) {
            Ok(_) => None,
            Err(e) => {
                dialog.error = Some(e.to_string());
                Some(dialog)
            }
        }
    }

    fn ui_confirm_delete(
        &mut self,
        ctx: &egui::Context,
        category: Category,
        name: String,
    ) -> Option<Dialog> {
        let mut confirmed = false;
        let mut cancelled = false;

        modal("Delete product").show(ctx, |ui| {
            ui.label(format!("Delete \"{}\" from {}?", name, category.label()));
            ui.separator();
            ui.horizontal(|ui| {
                confirmed = ui.button("Delete").clicked();
                cancelled = ui.button("Cancel").clicked();
            });
        });

        if confirmed {
            self.inventory.confirm_delete(category, &name);
            return None;
        }
        if cancelled {
            return None;
        }
        Some(Dialog::ConfirmDelete { category, name })
    }
}

fn ui_warning(ctx: &egui::Context, message: String) -> Option<String> {
    let mut closed = false;
    modal("Warning").show(ctx, |ui| {
        ui.label(message.as_str());
        closed = ui.button("OK").clicked();
    });
    (!closed).then_some(message)
}

fn modal<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

fn date_hint() -> String {
    DATE_FORMAT.replace("%d", "DD").replace("%m", "MM").replace("%Y", "YYYY")
}

fn apply_styling(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.window_margin = egui::Margin::symmetric(25.0, 20.0);

        style.text_styles = [
            (egui::TextStyle::Heading, egui::FontId::new(28.0, egui::FontFamily::Proportional)),
            (egui::TextStyle::Body, egui::FontId::new(16.0, egui::FontFamily::Proportional)),
            (egui::TextStyle::Button, egui::FontId::new(16.0, egui::FontFamily::Proportional)),
            (egui::TextStyle::Small, egui::FontId::new(12.0, egui::FontFamily::Proportional)),
            (egui::TextStyle::Monospace, egui::FontId::new(14.0, egui::FontFamily::Monospace)),
        ]
        .into();

        style.visuals.widgets.inactive.rounding = egui::Rounding::from(4.0);
        style.visuals.window_rounding = egui::Rounding::from(6.0);
    });
}

impl eframe::App for InventoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let enabled = self.dialog.is_none();

        egui::TopBottomPanel::top("category_tabs")
            .frame(egui::Frame::default().inner_margin(egui::Margin::symmetric(10.0, 8.0)))
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| self.ui_tabs(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.heading(self.active.label());
                ui.add_space(10.0);
                self.ui_toolbar(ui);
                ui.add_space(10.0);
                self.ui_product_table(ui);
                ui.separator();
                self.ui_summary(ui);
            });
        });

        self.ui_dialog(ctx);
    }
}
