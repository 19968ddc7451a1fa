use crate::application::range_calculator::DEFAULT_PADDING;
use crate::application::record_extractor::InputShape;
use crate::application::ticks::DEFAULT_TICK_INTERVALS;
use crate::domain::geometry::{ChartKind, Margins};
use crate::domain::telemetry::Channel;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default = "default_panes")]
    pub panes: Vec<PaneConfig>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            viewport: ViewportConfig::default(),
            margins: Margins::default(),
            chart: ChartSettings::default(),
            panes: default_panes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_shape")]
    pub shape: InputShape,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            shape: default_shape(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 550.0,
            height: 350.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ChartSettings {
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_tick_intervals")]
    pub tick_intervals: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            tick_intervals: DEFAULT_TICK_INTERVALS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PaneConfig {
    pub channel: Channel,
    pub kind: ChartKind,
}

fn default_shape() -> InputShape {
    InputShape::IndexedObject
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

fn default_tick_intervals() -> usize {
    DEFAULT_TICK_INTERVALS
}

/// The 2x2 layout: each channel paired with its own chart kind.
pub fn default_panes() -> Vec<PaneConfig> {
    vec![
        PaneConfig {
            channel: Channel::Illuminance,
            kind: ChartKind::Line,
        },
        PaneConfig {
            channel: Channel::Motion,
            kind: ChartKind::Bar,
        },
        PaneConfig {
            channel: Channel::Temperature,
            kind: ChartKind::Pie,
        },
        PaneConfig {
            channel: Channel::Sound,
            kind: ChartKind::Scatter,
        },
    ]
}

/// Load `config/render` (any format the `config` crate knows) overlaid with
/// `TELEMETRY__SECTION__KEY` environment variables. The file is optional.
pub fn load_render_config() -> anyhow::Result<RenderConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/render").required(false))
        .add_source(config::Environment::with_prefix("TELEMETRY").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
