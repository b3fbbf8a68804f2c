use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::metrics::Growth;
use crate::data::model::{Category, Manufacturer};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (min_date, max_date) = state.date_bounds();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date range");
            let mut start = state.selection.date_range.start;
            let mut end = state.selection.date_range.end;
            egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("From");
                if ui
                    .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                    .changed()
                {
                    state.set_start(start.clamp(min_date, max_date));
                }
                ui.end_row();

                ui.label("To");
                if ui
                    .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                    .changed()
                {
                    state.set_end(end.clamp(min_date, max_date));
                }
                ui.end_row();
            });
            if state.selection.date_range.is_inverted() {
                ui.label(RichText::new("Start is after end – nothing selected.").color(Color32::YELLOW));
            }
            ui.separator();

            // ---- Category ----
            ui.strong("Category");
            let current = state.selection.category;
            egui::ComboBox::from_id_salt("category")
                .selected_text(option_label(current))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "All").clicked() {
                        state.set_category(None);
                    }
                    for cat in Category::ALL {
                        let text = RichText::new(cat.code()).color(state.palette.categories.color_for(&cat));
                        if ui.selectable_label(current == Some(cat), text).clicked() {
                            state.set_category(Some(cat));
                        }
                    }
                });
            ui.separator();

            // ---- Manufacturer ----
            ui.strong("Manufacturer");
            let current = state.selection.manufacturer;
            egui::ComboBox::from_id_salt("manufacturer")
                .selected_text(option_label(current))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "All").clicked() {
                        state.set_manufacturer(None);
                    }
                    for m in Manufacturer::ALL {
                        let text = RichText::new(m.name()).color(state.palette.manufacturers.color_for(&m));
                        if ui.selectable_label(current == Some(m), text).clicked() {
                            state.set_manufacturer(Some(m));
                        }
                    }
                });
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

fn option_label<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "All".to_string(), |v| v.to_string())
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

/// Total registrations and the two growth figures.
pub fn kpi_strip(ui: &mut Ui, state: &AppState) {
    let growth = &state.view.growth;
    ui.columns(3, |cols: &mut [Ui]| {
        kpi_card(&mut cols[0], "Total registrations", RichText::new(state.view.total.to_string()));
        kpi_card(&mut cols[1], "YoY growth", growth_text(growth.yoy));
        kpi_card(
            &mut cols[2],
            &format!("QoQ growth ({} vs {})", growth.quarter, growth.quarter.pred()),
            growth_text(growth.qoq),
        );
    });
}

fn kpi_card(ui: &mut Ui, title: &str, value: RichText) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).weak());
            ui.label(value.size(24.0).strong());
        });
    });
}

/// N/A is greyed out so it cannot be mistaken for a number.
fn growth_text(growth: Growth) -> RichText {
    let text = RichText::new(growth.to_string());
    match growth.percent() {
        Some(p) if p < 0.0 => text.color(Color32::from_rgb(220, 80, 80)),
        Some(_) => text.color(Color32::from_rgb(80, 190, 110)),
        None => text.color(Color32::GRAY).italics(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export summary…").clicked() {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} rows loaded, {} visible",
            state
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            state.dataset.len(),
            state.view.filtered.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open registration data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset, path),
            Err(e) => {
                // The previous dataset stays active.
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard summary")
        .add_filter("JSON", &["json"])
        .set_file_name("summary.json")
        .save_file();

    if let Some(path) = file {
        match write_summary(state, &path) {
            Ok(()) => {
                log::info!("Wrote summary to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_summary(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let json = state
        .view
        .summary(&state.selection)
        .to_json()
        .context("serialising summary")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
