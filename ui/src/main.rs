#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context as _;
use quickqr_business::GeneratorConfig;
use quickqr_ui::QuickQrApp;
use quickqr_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    // Filter out egui_winit clipboard errors - they occur when clipboard content
    // is not in a supported text format (e.g., right after copying an image)
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        log::debug!("No .env loaded: {e}");
    }
    let config = GeneratorConfig::from_env()?;

    // Commands are spawned onto this runtime from the UI thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the Tokio runtime")?;
    let _guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_title("QR Code Generator")
            .with_inner_size([520.0, 780.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "QuickQR",
        native_options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let app = QuickQrApp::builder().state(State::new(config)).build();
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("QuickQR exited with an error: {e}"))
}
