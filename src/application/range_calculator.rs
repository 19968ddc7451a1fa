// Range calculator - padded time and value extents for scaling
use crate::domain::geometry::Domain;
use crate::domain::telemetry::{Dataset, Series};

pub const DEFAULT_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct RangeCalculator {
    padding: f64,
}

impl Default for RangeCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}

impl RangeCalculator {
    /// `padding` is the fraction of each range's width added on both sides.
    pub fn new(padding: f64) -> Self {
        Self {
            padding: padding.max(0.0),
        }
    }

    /// Extents of a single series.
    pub fn single(&self, series: &Series) -> Domain {
        let times = time_extent(std::iter::once(series));
        let values = value_extent(std::iter::once(series));
        self.pad(times, values)
    }

    /// Extents shared by every series of the dataset.
    pub fn across(&self, dataset: &Dataset) -> Domain {
        let times = time_extent(dataset.series().iter());
        let values = value_extent(dataset.series().iter());
        self.pad(times, values)
    }

    fn pad(&self, times: (f64, f64), values: (f64, f64)) -> Domain {
        let (time_min, time_max) = self.pad_range(times);
        let (value_min, value_max) = self.pad_range(values);
        Domain {
            time_min,
            time_max,
            value_min,
            value_max,
        }
    }

    fn pad_range(&self, (min, max): (f64, f64)) -> (f64, f64) {
        let mut width = max - min;
        if width == 0.0 {
            width = 1.0;
        }
        let padded = (min - width * self.padding, max + width * self.padding);
        ensure_positive_width(padded)
    }
}

/// Time extent of the parsed timestamps. Unparsed (all-zero) timestamps only
/// count when no sample has a parsed one.
fn time_extent<'a>(series: impl Iterator<Item = &'a Series> + Clone) -> (f64, f64) {
    let parsed = extent(
        series
            .clone()
            .flat_map(|s| s.samples())
            .filter(|sample| !sample.timestamp.is_zero())
            .map(|sample| sample.time()),
    );
    parsed.unwrap_or_else(|| {
        extent(series.flat_map(|s| s.samples()).map(|sample| sample.time())).unwrap_or((0.0, 0.0))
    })
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });
    (min <= max).then_some((min, max))
}

/// Value extent from the running extrema; flat data widens to `v ± 1`.
fn value_extent<'a>(series: impl Iterator<Item = &'a Series>) -> (f64, f64) {
    let (min, max) = series
        .filter(|s| !s.is_empty())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.min_value()), hi.max(s.max_value()))
        });
    if min > max {
        return (0.0, 0.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    (min, max)
}

/// Reject ranges whose padded width vanished in floating point.
fn ensure_positive_width((min, max): (f64, f64)) -> (f64, f64) {
    if max > min && (max - min).is_finite() {
        return (min, max);
    }

    let center = if min.is_finite() && max.is_finite() {
        min / 2.0 + max / 2.0
    } else {
        0.0
    };
    let half = (center.abs() * 1e-6).max(0.5);
    tracing::debug!(
        "Degenerate range [{}, {}] widened to {} +/- {}",
        min,
        max,
        center,
        half
    );
    (center - half, center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::record_extractor::InputShape;
    use crate::application::series_builder::parse_dataset;
    use crate::domain::telemetry::{Channel, Rgb, Sample};
    use crate::domain::timestamp::Timestamp;

    const JSON: &str = r#"{
        "1": {"time": "2024-03-01 10:00:00", "illuminance": 10, "current_motion": 1, "temperature": 20, "sound": 7},
        "2": {"time": "2024-03-01 10:10:00", "illuminance": 30, "current_motion": 0, "temperature": 20, "sound": 7}
    }"#;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_series_padding() {
        let dataset = parse_dataset(JSON, InputShape::IndexedObject).unwrap();
        let series = dataset.channel(Channel::Illuminance);
        let domain = RangeCalculator::default().single(series);

        let start = Timestamp::parse("2024-03-01 10:00:00").to_numeric();
        assert!(approx(domain.time_min, start - 60.0));
        assert!(approx(domain.time_max, start + 660.0));
        assert!(approx(domain.value_min, 8.0));
        assert!(approx(domain.value_max, 32.0));
    }

    #[test]
    fn test_constant_series_widens_before_padding() {
        let dataset = parse_dataset(JSON, InputShape::IndexedObject).unwrap();
        let domain = RangeCalculator::default().single(dataset.channel(Channel::Temperature));
        // [19, 21] padded by 10% of 2
        assert!(approx(domain.value_min, 18.8));
        assert!(approx(domain.value_max, 21.2));
    }

    #[test]
    fn test_cross_series_range() {
        let dataset = parse_dataset(JSON, InputShape::IndexedObject).unwrap();
        let domain = RangeCalculator::default().across(&dataset);
        // values span [0, 30]
        assert!(approx(domain.value_min, -3.0));
        assert!(approx(domain.value_max, 33.0));
        assert!(domain.time_max > domain.time_min);
    }

    #[test]
    fn test_single_timestamp_gets_positive_width() {
        let ts = Timestamp::parse("2024-03-01 10:00:00");
        let series = Series::from_samples("Sound", Rgb::new(0.5, 0.0, 0.5), [Sample::new(ts, 3.0)]);
        let domain = RangeCalculator::default().single(&series);
        assert!((domain.time_width() - 0.2).abs() < 1e-6);
        assert!(domain.value_max > domain.value_min);
    }

    #[test]
    fn test_unparsed_timestamp_left_out_of_time_range() {
        let json = r#"{
            "1": {"time": "2024-03-01 10:00:00", "sound": 1},
            "2": {"time": "not a time", "sound": 2},
            "3": {"time": "2024-03-01 10:10:00", "sound": 3}
        }"#;
        let dataset = parse_dataset(json, InputShape::IndexedObject).unwrap();
        let domain = RangeCalculator::default().single(dataset.channel(Channel::Sound));

        let start = Timestamp::parse("2024-03-01 10:00:00").to_numeric();
        assert!(approx(domain.time_min, start - 60.0));
        assert!(approx(domain.time_max, start + 660.0));
    }

    #[test]
    fn test_all_unparsed_timestamps_still_form_a_range() {
        let json = r#"{"1": {"sound": 1}, "2": {"time": "bogus", "sound": 2}}"#;
        let dataset = parse_dataset(json, InputShape::IndexedObject).unwrap();
        let domain = RangeCalculator::default().single(dataset.channel(Channel::Sound));

        let zero = Timestamp::ZERO.to_numeric();
        assert!(domain.time_min < zero && zero < domain.time_max);
    }

    #[test]
    fn test_empty_series_domain_is_valid() {
        let series = Series::new("Motion", Rgb::new(0.0, 0.7, 0.0));
        let domain = RangeCalculator::default().single(&series);
        assert!(domain.time_max > domain.time_min);
        assert!(domain.value_max > domain.value_min);
    }

    #[test]
    fn test_range_is_idempotent() {
        let dataset = parse_dataset(JSON, InputShape::IndexedObject).unwrap();
        let calculator = RangeCalculator::default();
        let first = calculator.across(&dataset);
        let second = calculator.across(&dataset);
        assert_eq!(first.time_min.to_bits(), second.time_min.to_bits());
        assert_eq!(first.time_max.to_bits(), second.time_max.to_bits());
        assert_eq!(first.value_min.to_bits(), second.value_min.to_bits());
        assert_eq!(first.value_max.to_bits(), second.value_max.to_bits());
    }

    #[test]
    fn test_vanishing_width_is_rejected() {
        let (min, max) = ensure_positive_width((1e300, 1e300));
        assert!(max > min);
        let (min, max) = ensure_positive_width((f64::NAN, f64::NAN));
        assert!(max > min);
    }
}
