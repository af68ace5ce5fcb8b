#![warn(clippy::all)]

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    use eframe::egui::{vec2, ViewportBuilder};

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = sparse_life::Config::default();
    tracing::info!(?config, "starting viewer");
    let mut app = sparse_life::App::new(config);
    // an optional RLE file to start from
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        app.load_rle_file(&path)
            .with_context(|| format!("cannot start from {}", path.display()))?;
    }

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size(vec2(1280., 800.))
            .with_min_inner_size(vec2(640.0, 360.0)),
        follow_system_theme: false,
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };
    eframe::run_native(
        "Cellular automata",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
}
