// Structural failures surfaced to callers
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    /// The payload container itself could not be read.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The payload was readable but contained no records.
    #[error("input contains no telemetry records")]
    EmptyDataset,

    #[error("unknown channel index {0}, expected 0-3")]
    UnknownChannel(usize),
}
