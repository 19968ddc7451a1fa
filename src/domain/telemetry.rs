// Telemetry data domain models
use super::error::TelemetryError;
use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn mean(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }
}

pub const CHANNEL_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Illuminance,
    Motion,
    Temperature,
    Sound,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Illuminance,
        Channel::Motion,
        Channel::Temperature,
        Channel::Sound,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Channel {
    type Error = TelemetryError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(TelemetryError::UnknownChannel(index))
    }
}

/// Static description of one channel: display name, payload key and colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub name: &'static str,
    pub field: &'static str,
    pub color: Rgb,
}

/// The fixed channel table, in dataset order.
pub const CHANNELS: [ChannelSpec; CHANNEL_COUNT] = [
    ChannelSpec {
        channel: Channel::Illuminance,
        name: "Illuminance",
        field: "illuminance",
        color: Rgb::new(1.0, 0.5, 0.0),
    },
    ChannelSpec {
        channel: Channel::Motion,
        name: "Motion",
        field: "current_motion",
        color: Rgb::new(0.0, 0.7, 0.0),
    },
    ChannelSpec {
        channel: Channel::Temperature,
        name: "Temperature",
        field: "temperature",
        color: Rgb::new(0.0, 0.0, 1.0),
    },
    ChannelSpec {
        channel: Channel::Sound,
        name: "Sound",
        field: "sound",
        color: Rgb::new(0.5, 0.0, 0.5),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn time(&self) -> f64 {
        self.timestamp.to_numeric()
    }
}

/// One channel's timeline with running value extrema.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    color: Rgb,
    samples: Vec<Sample>,
    min_value: f64,
    max_value: f64,
}

impl Series {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self::with_capacity(name, color, 0)
    }

    pub fn with_capacity(name: impl Into<String>, color: Rgb, capacity: usize) -> Self {
        Self {
            name: name.into(),
            color,
            samples: Vec::with_capacity(capacity),
            min_value: f64::INFINITY,
            max_value: f64::NEG_INFINITY,
        }
    }

    pub fn from_samples(
        name: impl Into<String>,
        color: Rgb,
        samples: impl IntoIterator<Item = Sample>,
    ) -> Self {
        let mut series = Self::new(name, color);
        for sample in samples {
            series.push(sample);
        }
        series
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        if sample.value < self.min_value {
            self.min_value = sample.value;
        }
        if sample.value > self.max_value {
            self.max_value = sample.value;
        }
        self.samples.push(sample);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Smallest sample value, `+inf` while the series is empty.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Largest sample value, `-inf` while the series is empty.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}

/// All four channels decoded from one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    series: [Series; CHANNEL_COUNT],
    label: Option<String>,
}

impl Dataset {
    pub(crate) fn new(series: [Series; CHANNEL_COUNT], label: Option<String>) -> Self {
        Self { series, label }
    }

    pub fn series(&self) -> &[Series; CHANNEL_COUNT] {
        &self.series
    }

    pub fn channel(&self, channel: Channel) -> &Series {
        &self.series[channel.index()]
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn record_count(&self) -> usize {
        self.series[0].len()
    }
}
