//! Sensor telemetry normalisation and chart geometry.
//!
//! Payloads in one of three declared shapes are decoded into a [`Dataset`] of
//! four co-sampled channels, from which line, bar, pie, scatter and overlay
//! geometry is derived for an external renderer.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::record_extractor::InputShape;
pub use application::render_service::RenderService;
pub use application::series_builder::{SeriesBuilder, parse_dataset};
pub use domain::error::TelemetryError;
pub use domain::geometry::{ChartGeometry, ChartKind, Domain, GeometryPrimitive, Viewport};
pub use domain::telemetry::{Channel, Dataset, Series};
