mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::GalcatApp;
use eframe::egui;
use galcat::config::CatalogConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument: a JSON config file.
    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::from_file(Path::new(&path)).unwrap_or_else(|e| {
            log::error!("{e:#}; falling back to defaults");
            CatalogConfig::from_env()
        }),
        None => CatalogConfig::from_env(),
    };

    let mut state = AppState::new(config.clone());
    state.open_catalog(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "galcat – Galaxy Catalog Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(GalcatApp::new(state)))),
    )
}
