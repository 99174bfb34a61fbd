use anyhow::anyhow;
use eframe::egui;
use tracing::info;

use stockroom::{app::InventoryApp, config::AppConfig, logging};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.log_filter);

    info!(
        width = config.window_width,
        height = config.window_height,
        "starting stockroom"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stockroom",
        options,
        Box::new(|cc| Box::new(InventoryApp::new(cc))),
    )
    .map_err(|e| anyhow!("failed to run the window: {e}"))?;

    info!("shutting down, in-memory inventory discarded");
    Ok(())
}
