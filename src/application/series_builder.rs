// Series builder - splits raw records into the four channel timelines
use crate::application::record_extractor::{FieldValue, InputShape, Records, extract_records};
use crate::domain::error::TelemetryError;
use crate::domain::telemetry::{CHANNEL_COUNT, CHANNELS, ChannelSpec, Dataset, Sample, Series};
use crate::domain::timestamp::Timestamp;

const TIME_FIELD: &str = "time";
const LABEL_FIELD: &str = "num";

#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    channels: [ChannelSpec; CHANNEL_COUNT],
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new(CHANNELS)
    }
}

impl SeriesBuilder {
    pub fn new(channels: [ChannelSpec; CHANNEL_COUNT]) -> Self {
        Self { channels }
    }

    /// Decode a payload of the given shape into a dataset.
    pub fn parse(&self, text: &str, shape: InputShape) -> Result<Dataset, TelemetryError> {
        self.build(extract_records(text, shape)?)
    }

    /// Build equal-length channel series from extracted records.
    ///
    /// Every record contributes exactly one sample to every channel. Missing
    /// or unreadable values become 0.0 and take part in the extrema like any
    /// other value; the record's timestamp is shared by all four samples.
    pub fn build(&self, records: Records<'_>) -> Result<Dataset, TelemetryError> {
        let count = records.record_count();
        if count == 0 {
            return Err(TelemetryError::EmptyDataset);
        }

        let mut series = self
            .channels
            .map(|spec| Series::with_capacity(spec.name, spec.color, count));
        let mut label = None;

        for (index, record) in records.enumerate() {
            let timestamp = match record.field(TIME_FIELD) {
                FieldValue::Value(text) => Timestamp::parse(&text),
                FieldValue::Absent | FieldValue::Empty => Timestamp::ZERO,
            };

            for (spec, series) in self.channels.iter().zip(series.iter_mut()) {
                series.push(Sample::new(timestamp, record.field(spec.field).number()));
            }

            if index == 0 {
                label = record.field(LABEL_FIELD).text().map(str::to_string);
            }
        }

        tracing::debug!(
            "Built {} series of {} samples (label: {:?})",
            series.len(),
            count,
            label
        );

        Ok(Dataset::new(series, label))
    }
}

/// Decode a payload with the standard channel table.
pub fn parse_dataset(text: &str, shape: InputShape) -> Result<Dataset, TelemetryError> {
    SeriesBuilder::default().parse(text, shape)
}
