// Render service - use cases for turning a dataset into chart panes
use crate::application::chart_geometry::ChartGeometryBuilder;
use crate::application::range_calculator::RangeCalculator;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::TelemetryError;
use crate::domain::geometry::{ChartGeometry, ChartKind, Margins, Viewport};
use crate::domain::telemetry::{CHANNELS, Channel, Dataset};
use crate::infrastructure::config::{ChartSettings, PaneConfig, RenderConfig};

const OVERLAY_TITLE: &str = "Sensor monitoring";

#[derive(Debug, Clone)]
pub struct RenderService {
    ranges: RangeCalculator,
    geometry: ChartGeometryBuilder,
    margins: Margins,
    panes: Vec<PaneConfig>,
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl RenderService {
    pub fn new(config: &RenderConfig) -> Self {
        let ChartSettings {
            padding,
            tick_intervals,
        } = config.chart;
        Self {
            ranges: RangeCalculator::new(padding),
            geometry: ChartGeometryBuilder::new(tick_intervals),
            margins: config.margins,
            panes: config.panes.clone(),
        }
    }

    pub fn panes(&self) -> &[PaneConfig] {
        &self.panes
    }

    pub fn viewport(&self, width: f64, height: f64) -> Viewport {
        Viewport::with_margins(width, height, self.margins)
    }

    /// Render request by channel index, as issued by a host window.
    pub fn render(
        &self,
        dataset: &Dataset,
        channel_index: usize,
        kind: ChartKind,
        width: f64,
        height: f64,
    ) -> Result<ChartGeometry, TelemetryError> {
        let channel = Channel::try_from(channel_index)?;
        Ok(self.render_channel(dataset, channel, kind, &self.viewport(width, height)))
    }

    pub fn render_channel(
        &self,
        dataset: &Dataset,
        channel: Channel,
        kind: ChartKind,
        viewport: &Viewport,
    ) -> ChartGeometry {
        let series = dataset.channel(channel);
        let domain = self.ranges.single(series);
        let name = CHANNELS[channel.index()].name;
        let title = with_label(format!("{}: {}", kind.label(), name), dataset);

        tracing::debug!(
            "Rendering {} as {:?} ({} samples)",
            name,
            kind,
            series.len()
        );
        self.geometry.build(title, series, &domain, viewport, kind)
    }

    /// All channels on one shared domain.
    pub fn render_overlay(&self, dataset: &Dataset, viewport: &Viewport) -> ChartGeometry {
        let domain = self.ranges.across(dataset);
        let title = with_label(OVERLAY_TITLE.to_string(), dataset);
        self.geometry.build_overlay(title, dataset, &domain, viewport)
    }

    /// Every configured pane plus the overlay, sequentially.
    pub fn render_dashboard(&self, dataset: &Dataset, viewport: &Viewport) -> Dashboard {
        let panes = self
            .panes
            .iter()
            .map(|pane| self.render_channel(dataset, pane.channel, pane.kind, viewport))
            .collect();
        let overlay = self.render_overlay(dataset, viewport);
        Dashboard::new(self.dashboard_title(dataset), panes, overlay)
    }

    pub fn dashboard_title(&self, dataset: &Dataset) -> String {
        with_label(OVERLAY_TITLE.to_string(), dataset)
    }
}

fn with_label(title: String, dataset: &Dataset) -> String {
    match dataset.label() {
        Some(label) => format!("{title} (No: {label})"),
        None => title,
    }
}
