use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selectors and actions
// ---------------------------------------------------------------------------

/// Render the left panel: file selection, period selectors, display buttons
/// and a preview of the loaded table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data");
    ui.label("Select a file with monthly price data:");
    if ui.button("Select data file…").clicked() {
        open_file_dialog(state);
    }
    if let Some(path) = &state.file_path {
        ui.label(RichText::new(path.display().to_string()).small());
    }
    ui.separator();

    ui.heading("Selection");
    ui.label("Year(s) to display (comma-separated years or ranges):");
    ui.add(egui::TextEdit::singleline(&mut state.year_input).hint_text("2010,2012-2014"));

    ui.label("Month(s) to display (comma-separated months or ranges):");
    ui.add(egui::TextEdit::singleline(&mut state.month_input).hint_text("1,3-4"));

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Display graph by year").clicked() {
            state.display_by_year();
        }
        if ui.button("Display graph by month").clicked() {
            state.display_by_month();
        }
    });
    ui.separator();

    data_preview(ui, state);
}

/// Summary line plus the first rows of the loaded table.
fn data_preview(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.label("No data loaded.");
        return;
    };
    if table.is_empty() {
        ui.label(RichText::new("The file contains no valid rows.").color(Color32::RED));
        return;
    }

    let span = table
        .year_span()
        .map(|(first, last)| format!(", {first}–{last}"))
        .unwrap_or_default();
    ui.label(format!(
        "{} observations ({} dropped){span}",
        table.len(),
        table.dropped
    ));

    let rows = table.head(state.config.preview_rows);
    egui::CollapsingHeader::new(RichText::new("Data preview").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .header(18.0, |mut header| {
                    for title in ["Date", "Year", "Month", "Price"] {
                        header.col(|ui: &mut Ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(16.0, rows.len(), |mut row| {
                        let obs = &rows[row.index()];
                        row.col(|ui: &mut Ui| {
                            ui.label(obs.date.format("%Y-%m-%d").to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(obs.year.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(obs.month.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.2}", obs.price));
                        });
                    });
                });
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
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!("{} observations loaded", table.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open price data")
        .add_filter(
            "Supported files",
            &["xlsx", "xlsm", "xls", "csv", "txt", "json", "parquet", "pq"],
        )
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
