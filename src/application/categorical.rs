// Categorical aggregation for the pie view
use crate::domain::telemetry::{Rgb, Series};
use std::f64::consts::TAU;

pub const BUCKET_EPSILON: f64 = 0.001;
pub const MAX_BUCKETS: usize = 100;
/// Slices narrower than this (radians) carry no label.
pub const LABEL_MIN_SPAN: f64 = 0.1;

pub const PALETTE: [Rgb; 10] = [
    Rgb::new(1.0, 0.0, 0.0),
    Rgb::new(0.0, 0.8, 0.0),
    Rgb::new(0.0, 0.0, 1.0),
    Rgb::new(1.0, 1.0, 0.0),
    Rgb::new(1.0, 0.0, 1.0),
    Rgb::new(0.0, 1.0, 1.0),
    Rgb::new(1.0, 0.5, 0.0),
    Rgb::new(0.5, 0.0, 0.5),
    Rgb::new(0.5, 0.5, 0.0),
    Rgb::new(0.0, 0.5, 0.5),
];

const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub bucket: Bucket,
    pub start_angle: f64,
    pub span: f64,
    pub color: Rgb,
    /// Label text and colour, present only for wide enough slices.
    pub label: Option<(String, Rgb)>,
}

impl Slice {
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.span
    }

    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.span / 2.0
    }
}

/// Value buckets of one series in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub buckets: Vec<Bucket>,
    /// Samples that found no bucket once the cap was reached.
    pub dropped: usize,
}

impl Aggregation {
    /// Number of samples that were bucketed.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Consecutive angular slices from angle 0, one per bucket.
    pub fn slices(&self) -> Vec<Slice> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut start_angle = 0.0;
        self.buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| {
                let span = TAU * bucket.count as f64 / total as f64;
                let color = PALETTE[index % PALETTE.len()];
                let label = (span > LABEL_MIN_SPAN).then(|| {
                    let text = format!("{:.1} ({})", bucket.value, bucket.count);
                    (text, contrast_color(color))
                });
                let slice = Slice {
                    bucket: *bucket,
                    start_angle,
                    span,
                    color,
                    label,
                };
                start_angle += span;
                slice
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategoricalAggregator {
    epsilon: f64,
    max_buckets: usize,
}

impl Default for CategoricalAggregator {
    fn default() -> Self {
        Self {
            epsilon: BUCKET_EPSILON,
            max_buckets: MAX_BUCKETS,
        }
    }
}

impl CategoricalAggregator {
    /// Group sample values that lie within epsilon of a bucket's first value.
    ///
    /// Buckets are scanned in creation order and the first match wins, even
    /// when a later bucket is closer.
    pub fn aggregate(&self, series: &Series) -> Aggregation {
        let mut buckets: Vec<Bucket> = Vec::new();
        let mut dropped = 0;

        for sample in series.samples() {
            let value = sample.value;
            if let Some(bucket) = buckets
                .iter_mut()
                .find(|b| (b.value - value).abs() < self.epsilon)
            {
                bucket.count += 1;
            } else if buckets.len() < self.max_buckets {
                buckets.push(Bucket { value, count: 1 });
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::warn!(
                "{}: {} samples beyond the {}-bucket limit left out of the pie",
                series.name(),
                dropped,
                self.max_buckets
            );
        }

        Aggregation { buckets, dropped }
    }
}

/// White text on dark fills, black on light ones.
pub fn contrast_color(fill: Rgb) -> Rgb {
    if fill.mean() < 0.5 { WHITE } else { BLACK }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::Sample;
    use crate::domain::timestamp::Timestamp;
    use std::f64::consts::PI;

    fn series(values: &[f64]) -> Series {
        Series::from_samples(
            "Temperature",
            Rgb::new(0.0, 0.0, 1.0),
            values.iter().map(|&v| Sample::new(Timestamp::ZERO, v)),
        )
    }

    #[test]
    fn test_two_buckets_scenario() {
        let aggregation = CategoricalAggregator::default().aggregate(&series(&[10.0, 10.0, 20.0]));
        assert_eq!(
            aggregation.buckets,
            vec![
                Bucket { value: 10.0, count: 2 },
                Bucket { value: 20.0, count: 1 },
            ]
        );

        let slices = aggregation.slices();
        assert!((slices[0].span - 4.0 * PI / 3.0).abs() < 1e-12);
        assert!((slices[1].span - 2.0 * PI / 3.0).abs() < 1e-12);
        assert_eq!(slices[0].start_angle, 0.0);
        assert_eq!(slices[1].start_angle, slices[0].end_angle());
    }

    #[test]
    fn test_first_bucket_wins() {
        // 1.0009 matches the 1.0 bucket although 1.0015 is closer
        let aggregation =
            CategoricalAggregator::default().aggregate(&series(&[1.0, 1.0015, 1.0009]));
        assert_eq!(aggregation.buckets.len(), 2);
        assert_eq!(aggregation.buckets[0].count, 2);
        assert_eq!(aggregation.buckets[1].count, 1);
    }

    #[test]
    fn test_spans_sum_to_full_circle() {
        let values: Vec<f64> = (0..250).map(|i| f64::from(i % 37) * 0.5).collect();
        let slices = CategoricalAggregator::default().aggregate(&series(&values)).slices();
        let sum: f64 = slices.iter().map(|s| s.span).sum();
        assert!((sum - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_cap_drops_overflow() {
        let values: Vec<f64> = (0..105).map(f64::from).collect();
        let aggregation = CategoricalAggregator::default().aggregate(&series(&values));
        assert_eq!(aggregation.buckets.len(), MAX_BUCKETS);
        assert_eq!(aggregation.dropped, 5);
        assert_eq!(aggregation.total(), 100);

        let sum: f64 = aggregation.slices().iter().map(|s| s.span).sum();
        assert!((sum - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_palette_cycles_and_labels() {
        let mut values: Vec<f64> = (0..12).map(f64::from).collect();
        values.extend([0.0; 30]);
        let slices = CategoricalAggregator::default().aggregate(&series(&values)).slices();

        assert_eq!(slices[10].color, PALETTE[0]);
        assert_eq!(slices[11].color, PALETTE[1]);

        // 31 of 42 samples: wide slice on red, labelled in white
        let (text, color) = slices[0].label.clone().unwrap();
        assert_eq!(text, "0.0 (31)");
        assert_eq!(color, WHITE);

        // 1 of 42 samples spans ~0.15 rad, still labelled; yellow gets black text
        let (_, color) = slices[3].label.clone().unwrap();
        assert_eq!(color, BLACK);
    }

    #[test]
    fn test_narrow_slices_are_unlabelled() {
        let mut values = vec![5.0; 99];
        values.push(6.0);
        let slices = CategoricalAggregator::default().aggregate(&series(&values)).slices();
        assert!(slices[0].label.is_some());
        assert!(slices[1].label.is_none());
    }

    #[test]
    fn test_empty_series_has_no_slices() {
        let aggregation = CategoricalAggregator::default().aggregate(&series(&[]));
        assert_eq!(aggregation.total(), 0);
        assert!(aggregation.slices().is_empty());
    }
}
