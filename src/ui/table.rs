use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use shannon_sheet::data::model::Table;
use shannon_sheet::data::selection::RAW_PREVIEW_ROWS;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Table view (central panel)
// ---------------------------------------------------------------------------

/// Raw preview of the loaded file, then the results table.
pub fn table_view(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a spreadsheet to get started  (File → Open…)");
        });
        return;
    };

    ui.strong("Raw Data Preview");
    let raw = table.head(RAW_PREVIEW_ROWS);
    ui.push_id("raw_preview", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            data_table(ui, &raw, &raw.columns);
        });
    });

    ui.separator();

    let Some(result) = &state.result else {
        ui.label(RichText::new("Select at least one column to calculate entropy from.").weak());
        return;
    };

    ui.strong("Matrix with Shannon Entropy");
    let columns = state.preview_columns();
    ui.push_id("results", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            data_table(ui, result, &columns);
        });
    });
}

fn data_table(ui: &mut Ui, table: &Table, columns: &[String]) {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), columns.len())
        .header(24.0, |mut header| {
            for name in columns {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong().monospace());
                });
            }
        })
        .body(|body| {
            body.rows(text_height + 8.0, table.len(), |mut row| {
                let row_idx = row.index();
                for name in columns {
                    row.col(|ui: &mut Ui| {
                        let value = table.cell(row_idx, name).to_string();
                        ui.label(RichText::new(value).monospace().small());
                    });
                }
            });
        });
}
