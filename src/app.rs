use eframe::egui;

use crate::state::{AppState, CentralView};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ShannonSheetApp {
    pub state: AppState,
}

impl eframe::App for ShannonSheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: column selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables or chart ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            CentralView::Table => table::table_view(ui, &self.state),
            CentralView::Chart => plot::entropy_chart(ui, &self.state),
        });
    }
}
