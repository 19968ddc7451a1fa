// Axis tick placement and label formatting
use crate::application::scale::LinearScale;
use crate::domain::geometry::{Axis, AxisTick};
use crate::domain::timestamp::Timestamp;

pub const DEFAULT_TICK_INTERVALS: usize = 5;

/// `intervals + 1` evenly spaced ticks across the scale's domain.
pub fn axis_ticks(axis: Axis, scale: &LinearScale, intervals: usize) -> Vec<AxisTick> {
    let intervals = intervals.max(1);
    (0..=intervals)
        .map(|i| {
            let ratio = i as f64 / intervals as f64;
            let value = scale.domain_min + ratio * (scale.domain_max - scale.domain_min);
            AxisTick {
                axis,
                position: scale.map(value),
                value,
                label: match axis {
                    Axis::Time => format_clock(value),
                    Axis::Value => format_value(value),
                },
            }
        })
        .collect()
}

/// Local wall-clock `HH:MM` of a numeric time, whole seconds only.
pub fn format_clock(numeric_time: f64) -> String {
    let ts = Timestamp::from_numeric(numeric_time.trunc());
    format!("{:02}:{:02}", ts.hour, ts.minute)
}

pub fn format_value(value: f64) -> String {
    format!("{value:.1}")
}
