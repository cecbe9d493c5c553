use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "BRENT_VIEWER_CONFIG";

/// Settings file looked up in the working directory when `CONFIG_ENV` is unset.
pub const CONFIG_FILE: &str = "brent_viewer.json";

/// Optional user settings. Every key may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name used in chart titles and the y-axis label.
    pub commodity: String,
    pub window_size: [f32; 2],
    pub line_width: f32,
    pub marker_radius: f32,
    /// Rows shown in the data preview table.
    pub preview_rows: usize,
    pub default_year_input: String,
    pub default_month_input: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            commodity: "Brent Crude Oil".to_string(),
            window_size: [1100.0, 720.0],
            line_width: 2.0,
            marker_radius: 3.5,
            preview_rows: 10,
            default_year_input: String::new(),
            default_month_input: String::new(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        Ok(config)
    }

    /// Settings from `$BRENT_VIEWER_CONFIG`, else `./brent_viewer.json`, else
    /// defaults. A broken file is logged and ignored.
    pub fn discover() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    return Self::default();
                }
                local
            }
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring settings: {e:#}");
                Self::default()
            }
        }
    }
}
