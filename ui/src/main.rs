#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context as _, anyhow};
use roster_business::BusinessConfig;
use roster_ui::RosterApp;
use roster_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let config = BusinessConfig::from_env().context("Failed to read configuration")?;
    log::info!("Using user directory at {}", config.api_url());
    if config.bearer_token().is_none() {
        log::warn!("ROSTER_TOKEN is not set, requests will be sent without authorization");
    }

    // Commands are spawned onto this runtime from the UI thread.
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Roster",
        native_options,
        Box::new(move |_cc| {
            let app = RosterApp::new(State::new(config));
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Failed to run the UI: {e}"))
}
