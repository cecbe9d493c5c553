use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::data::chart::{Chart, month_chart, year_chart};
use crate::data::error::SelectionError;
use crate::data::loader;
use crate::data::model::PriceTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The session context, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded table (None until the user loads a file).
    pub table: Option<PriceTable>,

    /// Path of the currently loaded file.
    pub file_path: Option<PathBuf>,

    /// Year selector text, e.g. `2010,2012-2014`.
    pub year_input: String,

    /// Month selector text, e.g. `1,3-4`.
    pub month_input: String,

    /// Result of the last successful display action.
    pub chart: Option<Chart>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            year_input: config.default_year_input.clone(),
            month_input: config.default_month_input.clone(),
            config,
            table: None,
            file_path: None,
            chart: None,
            status_message: None,
        }
    }

    /// Replace the session table wholesale.
    pub fn set_table(&mut self, table: PriceTable) {
        self.file_path = table.source.clone();
        self.table = Some(table);
        self.chart = None;
        self.status_message = None;
    }

    /// Load `path`; on failure the previous table (if any) stays in place.
    pub fn load_path(&mut self, path: &Path) {
        log::info!("File selected: {}", path.display());
        match loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} observations ({} dropped) from {}",
                    table.len(),
                    table.dropped,
                    path.display()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// "Display graph by year" action.
    pub fn display_by_year(&mut self) {
        let result = self
            .loaded_table()
            .and_then(|table| year_chart(table, &self.year_input, &self.config.commodity));
        self.finish_display(result);
    }

    /// "Display graph by month" action.
    pub fn display_by_month(&mut self) {
        let result = self.loaded_table().and_then(|table| {
            month_chart(
                table,
                &self.year_input,
                &self.month_input,
                &self.config.commodity,
            )
        });
        self.finish_display(result);
    }

    fn loaded_table(&self) -> Result<&PriceTable, SelectionError> {
        self.table.as_ref().ok_or(SelectionError::NoTable)
    }

    fn finish_display(&mut self, result: Result<Chart, SelectionError>) {
        match result {
            Ok(chart) => {
                log::info!("Showing '{}' with {} series", chart.title, chart.series.len());
                self.chart = Some(chart);
                self.status_message = None;
            }
            Err(e) => {
                match &e {
                    SelectionError::Parse { .. } => log::error!("{e}"),
                    _ => log::info!("{e}"),
                }
                self.chart = None;
                self.status_message = Some(e.to_string());
            }
        }
    }
}
