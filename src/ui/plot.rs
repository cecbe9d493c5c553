use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::series_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Price chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart of the last display action in the central panel.
pub fn price_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                let hint = if state.table.is_none() {
                    "Open a file to view prices  (File → Open…)"
                } else {
                    "Enter years / months and press a display button"
                };
                ui.heading(hint);
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    // Only selected periods get a tick label.
    let ticks: BTreeSet<i32> = chart.x_ticks.iter().copied().collect();
    let tick_label = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let value = mark.value.round();
        if (mark.value - value).abs() < 1e-6 && ticks.contains(&(value as i32)) {
            format!("{value:.0}")
        } else {
            String::new()
        }
    };

    let line_width = state.config.line_width;
    let marker_radius = state.config.marker_radius;
    let colors = series_palette(chart.series.len());

    Plot::new("price_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .x_axis_formatter(tick_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series, &color) in chart.series.iter().zip(&colors) {
                let line: PlotPoints = series.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(line)
                        .name(&series.label)
                        .color(color)
                        .width(line_width),
                );

                // Markers keep one-point series visible.
                let markers: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(markers)
                        .name(&series.label)
                        .color(color)
                        .radius(marker_radius),
                );
            }
        });
}
