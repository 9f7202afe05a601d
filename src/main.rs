mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;

use cli::Args;
use data::loader::load_file;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    args.validate()?;

    // A dataset that cannot be loaded aborts before any window opens.
    let dataset = load_file(&args.data)
        .with_context(|| format!("loading launch records from {}", args.data.display()))?;
    log::info!(
        "Loaded {} launches from {} ({} sites, payload {:?} kg)",
        dataset.len(),
        args.data.display(),
        dataset.distinct_sites().len(),
        dataset.payload_bounds()
    );

    let state = AppState::new(dataset, args.data.clone(), args.slider_step);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Dash – Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
