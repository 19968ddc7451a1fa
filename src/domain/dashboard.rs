// Dashboard domain model
use super::geometry::ChartGeometry;
use serde::Serialize;

/// The four configured panes plus the all-channel overlay of one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub panes: Vec<ChartGeometry>,
    pub overlay: ChartGeometry,
}

impl Dashboard {
    pub fn new(title: String, panes: Vec<ChartGeometry>, overlay: ChartGeometry) -> Self {
        Self {
            title,
            panes,
            overlay,
        }
    }
}
