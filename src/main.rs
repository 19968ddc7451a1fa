// Main entry point - configuration, loading and pane rendering
use std::sync::Arc;

use anyhow::Context;
use sensor_charts::RenderService;
use sensor_charts::infrastructure::config::load_render_config;
use sensor_charts::infrastructure::input_loader::load_dataset;
use sensor_charts::presentation::pane_tasks::{render_dashboard, write_json};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the geometry
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_render_config()?;
    if let Some(path) = std::env::args().nth(1) {
        config.input.path = Some(path);
    }
    let path = config
        .input
        .path
        .clone()
        .context("No input file: pass a path or set input.path in config/render")?;

    let dataset = Arc::new(load_dataset(&path, config.input.shape)?);
    tracing::info!(
        "Decoded {} records from {} (label: {:?})",
        dataset.record_count(),
        path,
        dataset.label()
    );

    let service = Arc::new(RenderService::new(&config));
    let viewport = service.viewport(config.viewport.width, config.viewport.height);
    let dashboard = render_dashboard(service, dataset, viewport).await?;

    write_json(&dashboard, std::io::stdout().lock())?;
    Ok(())
}
