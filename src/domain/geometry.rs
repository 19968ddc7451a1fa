// Chart geometry domain models handed to the external renderer
use super::telemetry::Rgb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line chart",
            ChartKind::Bar => "Bar chart",
            ChartKind::Pie => "Pie chart",
            ChartKind::Scatter => "Scatter chart",
        }
    }

    pub fn has_axes(self) -> bool {
        self != ChartKind::Pie
    }
}

/// Padded time and value extents. Both ranges always have positive width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub time_min: f64,
    pub time_max: f64,
    pub value_min: f64,
    pub value_max: f64,
}

impl Domain {
    pub fn time_width(&self) -> f64 {
        self.time_max - self.time_min
    }

    pub fn value_width(&self) -> f64 {
        self.value_max - self.value_min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 50.0,
            right: 50.0,
            top: 20.0,
            bottom: 60.0,
        }
    }
}

/// Pixel size of one chart pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_margins(width, height, Margins::default())
    }

    pub fn with_margins(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            width,
            height,
            margins,
        }
    }

    /// Area inside the margins where axis charts are drawn.
    pub fn plot_rect(&self) -> PlotRect {
        PlotRect {
            left: self.margins.left,
            top: self.margins.top,
            width: (self.width - self.margins.left - self.margins.right).max(0.0),
            height: (self.height - self.margins.top - self.margins.bottom).max(0.0),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryPrimitive {
    Point {
        x: f64,
        y: f64,
        size: f64,
        color: Rgb,
    },
    Segment {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb,
    },
    Sector {
        cx: f64,
        cy: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
        color: Rgb,
        label: Option<SectorLabel>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Time,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub axis: Axis,
    /// Pixel coordinate along the axis (x for time, y for value).
    pub position: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: Rgb,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Everything the renderer needs for one pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub title: String,
    pub kind: Option<ChartKind>,
    pub primitives: Vec<GeometryPrimitive>,
    pub ticks: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
    pub stats: Option<SeriesStats>,
}

impl ChartGeometry {
    pub fn new(title: String, kind: Option<ChartKind>) -> Self {
        Self {
            title,
            kind,
            primitives: Vec::new(),
            ticks: Vec::new(),
            legend: Vec::new(),
            stats: None,
        }
    }
}
