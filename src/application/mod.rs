// Application layer - parsing, ranging and geometry use cases
pub mod categorical;
pub mod chart_geometry;
pub mod range_calculator;
pub mod record_extractor;
pub mod render_service;
pub mod scale;
pub mod series_builder;
pub mod ticks;
