mod app;

use anyhow::Result;
use eframe::egui;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    });
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = sim_core::Config::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([700.0, 750.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SIM v6.0 - Edición Estable",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app::SimApp::new(config)))
        }),
    )
    .map_err(|err| anyhow::anyhow!(err.to_string()))
}
