mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::BrentViewerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::discover();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = format!("{} Price Analyzer", config.commodity);
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(BrentViewerApp::new(config)))),
    )
}
