use std::sync::Arc;

use eframe::egui;

use crate::config::DashConfig;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashConfig, dataset: Dataset) -> Self {
        let mut state = AppState::new(config);

        // Workers wake the UI when a result lands.
        let ctx = cc.egui_ctx.clone();
        state.set_notifier(Arc::new(move || ctx.request_repaint()));
        state.set_dataset(dataset);

        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_results();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site + payload controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: title, pie, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&self.state.config.title);
            });
            ui.separator();

            let half = (ui.available_height() / 2.0 - 8.0).max(160.0);
            ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui| {
                charts::success_pie(ui, &self.state);
            });
            ui.separator();
            charts::payload_scatter(ui, &self.state);
        });
    }
}
