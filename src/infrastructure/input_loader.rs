// Payload loading from the local file system
use crate::application::record_extractor::InputShape;
use crate::application::series_builder::SeriesBuilder;
use crate::domain::telemetry::Dataset;
use anyhow::{Context, Result};
use std::path::Path;

/// Read one payload file and decode it with the declared shape.
pub fn load_dataset(path: impl AsRef<Path>, shape: InputShape) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read telemetry file {}", path.display()))?;

    tracing::info!("Loaded {} bytes from {}", text.len(), path.display());

    SeriesBuilder::default()
        .parse(&text, shape)
        .with_context(|| format!("Failed to decode {} as {:?}", path.display(), shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TelemetryError;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("sensor-charts-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_entry_file() {
        let path = write_temp(
            "entries.xml",
            "<log><entry><time>2024-03-01 10:00:00</time><sound>3</sound></entry></log>",
        );
        let dataset = load_dataset(&path, InputShape::EntryWrapper).unwrap();
        assert_eq!(dataset.record_count(), 1);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_keeps_typed_failure() {
        let path = write_temp("empty.json", "{}");
        let err = load_dataset(&path, InputShape::IndexedObject).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TelemetryError>(),
            Some(&TelemetryError::EmptyDataset)
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(load_dataset("/nonexistent/readings.json", InputShape::IndexedObject).is_err());
    }
}
