use std::time::Duration;

use eframe::egui;
use rusty_catalog::config::FetchConfig;
use rusty_catalog::state::AppState;

use crate::ui::{grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyCatalogApp {
    pub state: AppState,
    pub fetch_config: FetchConfig,
}

impl RustyCatalogApp {
    pub fn new(fetch_config: FetchConfig) -> Self {
        Self {
            state: AppState::default(),
            fetch_config,
        }
    }
}

impl eframe::App for RustyCatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up a finished background import before drawing.
        self.state.poll_import();
        if self.state.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: import controls ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.fetch_config);
        });

        // ---- Left side panel: filters (only once something is loaded) ----
        if !self.state.catalog().is_empty() {
            egui::SidePanel::left("filter_panel")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: upload prompt or product grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.catalog().is_empty() {
                panels::upload_panel(ui, &mut self.state, &self.fetch_config);
            } else {
                grid::product_grid(ui, &mut self.state);
            }
        });
    }
}
