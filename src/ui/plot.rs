use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, HLine, LineStyle, Plot};

use shannon_sheet::data::entropy::{ENTROPY_COLUMN, to_number};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Entropy chart (central panel)
// ---------------------------------------------------------------------------

/// One bar per row, coloured by category, with the `log2(k)` ceiling.
pub fn entropy_chart(ui: &mut Ui, state: &AppState) {
    let (Some(result), Some(keys)) = (&state.result, &state.keys) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load a file and select columns to chart entropy");
        });
        return;
    };

    let color_map = &state.color_map;

    let bars: Vec<Bar> = (0..result.len())
        .map(|idx| {
            let category = result.cell(idx, &keys.category);
            let color = color_map
                .as_ref()
                .map(|cm| cm.color_for(category))
                .unwrap_or(Color32::LIGHT_BLUE);
            let entropy = to_number(result.cell(idx, ENTROPY_COLUMN));
            Bar::new(idx as f64, entropy)
                .name(format!("{idx}: {category}"))
                .fill(color)
                .width(0.8)
        })
        .collect();

    let chart_name = match color_map {
        Some(cm) => format!("{ENTROPY_COLUMN} by {} ({} values)", cm.column, cm.len()),
        None => ENTROPY_COLUMN.to_string(),
    };
    let chart = BarChart::new(bars).name(chart_name);

    Plot::new("entropy_chart")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Row")
        .y_axis_label("Entropy (bits)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            if let Some(max) = state.max_entropy {
                plot_ui.hline(
                    HLine::new(max)
                        .name("log2(k)")
                        .color(Color32::GRAY)
                        .style(LineStyle::dashed_loose()),
                );
            }
        });
}
