// Concurrent pane rendering and JSON output for the host renderer
use crate::application::render_service::RenderService;
use crate::domain::dashboard::Dashboard;
use crate::domain::geometry::{ChartGeometry, Viewport};
use crate::domain::telemetry::Dataset;
use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Render every configured pane on its own blocking task.
///
/// Panes share the dataset read-only; results are reassembled in pane order.
pub async fn render_dashboard(
    service: Arc<RenderService>,
    dataset: Arc<Dataset>,
    viewport: Viewport,
) -> anyhow::Result<Dashboard> {
    let pane_count = service.panes().len();
    let (tx, mut rx) = mpsc::channel::<(usize, ChartGeometry)>(pane_count.max(1));

    for (index, pane) in service.panes().iter().copied().enumerate() {
        let tx = tx.clone();
        let service = service.clone();
        let dataset = dataset.clone();

        tokio::task::spawn_blocking(move || {
            let chart = service.render_channel(&dataset, pane.channel, pane.kind, &viewport);
            if tx.blocking_send((index, chart)).is_err() {
                tracing::warn!("Pane {} finished after the receiver closed", index);
            }
        });
    }
    drop(tx);

    let mut panes: Vec<Option<ChartGeometry>> = vec![None; pane_count];
    while let Some((index, chart)) = rx.recv().await {
        tracing::debug!("Pane {} ready: {}", index, chart.title);
        panes[index] = Some(chart);
    }

    let panes = panes
        .into_iter()
        .enumerate()
        .map(|(index, pane)| pane.with_context(|| format!("Pane {index} failed to render")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let title = service.dashboard_title(&dataset);
    let overlay = service.render_overlay(&dataset, &viewport);
    Ok(Dashboard::new(title, panes, overlay))
}

pub fn write_json(dashboard: &Dashboard, mut out: impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, dashboard).context("Failed to serialize geometry")?;
    writeln!(out)?;
    Ok(())
}
