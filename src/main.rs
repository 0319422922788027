mod app;
mod ui;

use app::RustyCatalogApp;
use eframe::egui;
use rusty_catalog::config::FetchConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let fetch_config = FetchConfig::from_env();
    log::debug!("Fetch settings: {fetch_config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Catalog – Product Filter",
        options,
        Box::new(|_cc| Ok(Box::new(RustyCatalogApp::new(fetch_config)))),
    )
}
