use anyhow::Context;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::DashConfig;
use launch_dash::data::loader::load_file;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::from_env();

    // The dataset is loaded exactly once, before any window exists; a bad
    // source ends the process here.
    let dataset = load_file(&config.data_path, &config.columns).inspect_err(|e| {
        log::error!("Failed to load {}: {e:#}", config.data_path.display());
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(LaunchDashApp::new(cc, config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}
