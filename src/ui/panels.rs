use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use shannon_sheet::data::export::{DEFAULT_EXPORT_NAME, save_file};
use shannon_sheet::data::loader::{SUPPORTED_EXTENSIONS, load_file};

use crate::state::{AppState, CentralView};

// ---------------------------------------------------------------------------
// Left side panel – key columns and entropy columns
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Key Columns");
    ui.separator();

    let (Some(table), Some(keys)) = (&state.table, &state.keys) else {
        ui.label("No table loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let columns = table.columns.clone();
    let keys = keys.clone();

    ui.strong("Category column");
    egui::ComboBox::from_id_salt("category_column")
        .selected_text(&keys.category)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(keys.category == *col, col).clicked() {
                    state.set_category_column(col.clone());
                }
            }
        });

    ui.strong("Total column");
    egui::ComboBox::from_id_salt("total_column")
        .selected_text(&keys.total)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(keys.total == *col, col).clicked() {
                    state.set_total_column(col.clone());
                }
            }
        });
    ui.separator();

    let candidates = state.candidates();
    ui.strong(format!(
        "Entropy columns  ({}/{})",
        state.selected.len(),
        candidates.len()
    ));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &candidates {
                let mut checked = state.selected.contains(col);
                if ui.checkbox(&mut checked, col).changed() {
                    state.toggle_column(col);
                }
            }
        });
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
            let can_save = state.result.is_some();
            if ui
                .add_enabled(can_save, egui::Button::new("Save results…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, CentralView::Table, "Table");
        ui.selectable_value(&mut state.view, CentralView::Chart, "Chart");

        ui.separator();

        if let Some(table) = &state.table {
            let name = state
                .source_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} rows, {} columns",
                table.len(),
                table.columns.len()
            ));
        }

        if let Some(summary) = &state.summary {
            ui.separator();
            ui.label(format!(
                "entropy min {:.4} / mean {:.4} / max {:.4}",
                summary.min, summary.mean, summary.max
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open count matrix")
        .add_filter("Supported files", SUPPORTED_EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path) {
            Ok(table) => {
                log::info!("Loaded table with columns {:?}", table.columns);
                state.set_table(table, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error reading file: {e:#}"));
            }
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let Some(result) = &state.result else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save results")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = save_file(result, &path) {
            log::error!("Failed to save results: {e:#}");
            state.status_message = Some(format!("Error saving file: {e:#}"));
        }
    }
}
