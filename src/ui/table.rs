use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::constants::TABLE_ROW_HEIGHT;
use crate::data::DATE_FORMAT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Filtered data table (bottom panel)
// ---------------------------------------------------------------------------

pub fn registration_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.view.filtered;
    ui.strong(format!("Filtered data ({} rows)", rows.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(TABLE_ROW_HEIGHT + 2.0, |mut header| {
            for title in ["Date", "Manufacturer", "Category", "Registrations"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            // Only visible rows are laid out.
            body.rows(TABLE_ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(r.date.format(DATE_FORMAT).to_string());
                });
                row.col(|ui| {
                    ui.label(r.manufacturer.name());
                });
                row.col(|ui| {
                    ui.label(r.category().code());
                });
                row.col(|ui| {
                    ui.label(r.registrations.to_string());
                });
            });
        });
}
