// Domain layer - telemetry and geometry models
pub mod dashboard;
pub mod error;
pub mod geometry;
pub mod telemetry;
pub mod timestamp;
