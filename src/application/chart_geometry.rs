// Chart geometry builder - drawable primitives per chart kind
use crate::application::categorical::CategoricalAggregator;
use crate::application::scale::LinearScale;
use crate::application::ticks::{DEFAULT_TICK_INTERVALS, axis_ticks};
use crate::domain::geometry::{
    Axis, AxisTick, ChartGeometry, ChartKind, Domain, GeometryPrimitive, LegendEntry, SectorLabel,
    SeriesStats, Viewport,
};
use crate::domain::telemetry::{Dataset, Rgb, Series};
use std::f64::consts::TAU;

const MARKER_SIZE: f64 = 3.0;
const BAR_WIDTH_RATIO: f64 = 0.6;
const SCATTER_BASE_RADIUS: f64 = 2.0;
const SCATTER_RADIUS_RANGE: f64 = 2.0;
const PIE_RADIUS_DIVISOR: f64 = 3.0;
const PIE_LABEL_RADIUS: f64 = 0.7;

const NEUTRAL: Rgb = Rgb::new(0.8, 0.8, 0.8);
const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy)]
pub struct ChartGeometryBuilder {
    tick_intervals: usize,
    aggregator: CategoricalAggregator,
}

impl Default for ChartGeometryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVALS)
    }
}

impl ChartGeometryBuilder {
    pub fn new(tick_intervals: usize) -> Self {
        Self {
            tick_intervals,
            aggregator: CategoricalAggregator::default(),
        }
    }

    /// Geometry of one series as the requested chart kind.
    ///
    /// An empty series yields the "no data" placeholder instead of a chart.
    pub fn build(
        &self,
        title: String,
        series: &Series,
        domain: &Domain,
        viewport: &Viewport,
        kind: ChartKind,
    ) -> ChartGeometry {
        let mut chart = ChartGeometry::new(title, Some(kind));
        if series.is_empty() {
            chart.primitives.push(no_data(viewport));
            return chart;
        }

        chart.stats = Some(SeriesStats {
            min: series.min_value(),
            max: series.max_value(),
            count: series.len(),
        });

        let (x, y) = axes(domain, viewport);
        chart.primitives = match kind {
            ChartKind::Line => line(series, &x, &y),
            ChartKind::Bar => bars(series, &x, &y, viewport),
            ChartKind::Scatter => scatter(series, &x, &y, domain),
            ChartKind::Pie => self.pie(series, viewport),
        };
        if kind.has_axes() {
            chart.ticks = self.ticks(&x, &y);
        }
        chart
    }

    /// Every non-empty series of the dataset as line charts on one domain.
    pub fn build_overlay(
        &self,
        title: String,
        dataset: &Dataset,
        domain: &Domain,
        viewport: &Viewport,
    ) -> ChartGeometry {
        let mut chart = ChartGeometry::new(title, None);
        let (x, y) = axes(domain, viewport);

        for series in dataset.series().iter().filter(|s| !s.is_empty()) {
            chart.primitives.extend(line(series, &x, &y));
            chart.legend.push(LegendEntry {
                name: series.name().to_string(),
                color: series.color(),
                min: series.min_value(),
                max: series.max_value(),
            });
        }

        if chart.primitives.is_empty() {
            chart.primitives.push(no_data(viewport));
        } else {
            chart.ticks = self.ticks(&x, &y);
        }
        chart
    }

    fn ticks(&self, x: &LinearScale, y: &LinearScale) -> Vec<AxisTick> {
        let mut ticks = axis_ticks(Axis::Time, x, self.tick_intervals);
        ticks.extend(axis_ticks(Axis::Value, y, self.tick_intervals));
        ticks
    }

    fn pie(&self, series: &Series, viewport: &Viewport) -> Vec<GeometryPrimitive> {
        let aggregation = self.aggregator.aggregate(series);
        let (cx, cy) = viewport.center();
        let r = pie_radius(viewport);

        let mut primitives: Vec<GeometryPrimitive> = aggregation
            .slices()
            .into_iter()
            .map(|slice| {
                let mid = slice.mid_angle();
                let label = slice.label.clone().map(|(text, color)| SectorLabel {
                    text,
                    x: cx + r * PIE_LABEL_RADIUS * mid.cos(),
                    y: cy + r * PIE_LABEL_RADIUS * mid.sin(),
                    color,
                });
                GeometryPrimitive::Sector {
                    cx,
                    cy,
                    r,
                    start_angle: slice.start_angle,
                    end_angle: slice.end_angle(),
                    color: slice.color,
                    label,
                }
            })
            .collect();

        primitives.push(GeometryPrimitive::Text {
            x: cx,
            y: cy,
            text: format!("Total: {}", aggregation.total()),
            color: BLACK,
        });
        primitives
    }
}

fn axes(domain: &Domain, viewport: &Viewport) -> (LinearScale, LinearScale) {
    let rect = viewport.plot_rect();
    let x = LinearScale::new(domain.time_min, domain.time_max, rect.left, rect.width);
    let y = LinearScale::new(
        domain.value_min,
        domain.value_max,
        rect.bottom(),
        -rect.height,
    );
    (x, y)
}

fn pie_radius(viewport: &Viewport) -> f64 {
    viewport.width.min(viewport.height) / PIE_RADIUS_DIVISOR
}

fn no_data(viewport: &Viewport) -> GeometryPrimitive {
    let (cx, cy) = viewport.center();
    GeometryPrimitive::Sector {
        cx,
        cy,
        r: pie_radius(viewport),
        start_angle: 0.0,
        end_angle: TAU,
        color: NEUTRAL,
        label: Some(SectorLabel {
            text: "no data".to_string(),
            x: cx,
            y: cy,
            color: BLACK,
        }),
    }
}

fn positions(series: &Series, x: &LinearScale, y: &LinearScale) -> Vec<(f64, f64)> {
    series
        .samples()
        .iter()
        .map(|sample| (x.map(sample.time()), y.map(sample.value)))
        .collect()
}

fn line(series: &Series, x: &LinearScale, y: &LinearScale) -> Vec<GeometryPrimitive> {
    let color = series.color();
    let points = positions(series, x, y);

    let segments = points.windows(2).map(|pair| GeometryPrimitive::Segment {
        x1: pair[0].0,
        y1: pair[0].1,
        x2: pair[1].0,
        y2: pair[1].1,
        color,
    });
    let markers = points.iter().map(|&(px, py)| GeometryPrimitive::Point {
        x: px,
        y: py,
        size: MARKER_SIZE,
        color,
    });
    segments.chain(markers).collect()
}

fn bars(
    series: &Series,
    x: &LinearScale,
    y: &LinearScale,
    viewport: &Viewport,
) -> Vec<GeometryPrimitive> {
    let color = series.color();
    let baseline = y.origin;
    let w = viewport.plot_rect().width / series.len() as f64 * BAR_WIDTH_RATIO;

    positions(series, x, y)
        .into_iter()
        .map(|(px, top)| GeometryPrimitive::Rect {
            x: px - w / 2.0,
            y: top,
            w,
            h: baseline - top,
            color,
        })
        .collect()
}

fn scatter(
    series: &Series,
    x: &LinearScale,
    y: &LinearScale,
    domain: &Domain,
) -> Vec<GeometryPrimitive> {
    let color = series.color();
    let width = domain.value_width();

    series
        .samples()
        .iter()
        .map(|sample| {
            let size = if width == 0.0 {
                SCATTER_BASE_RADIUS
            } else {
                SCATTER_BASE_RADIUS
                    + SCATTER_RADIUS_RANGE * (sample.value - domain.value_min) / width
            };
            GeometryPrimitive::Point {
                x: x.map(sample.time()),
                y: y.map(sample.value),
                size,
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::range_calculator::RangeCalculator;
    use crate::domain::telemetry::Sample;
    use crate::domain::timestamp::Timestamp;

    fn series(values: &[f64]) -> Series {
        let start = Timestamp::parse("2024-03-01 10:00:00");
        Series::from_samples(
            "Illuminance",
            Rgb::new(1.0, 0.5, 0.0),
            values.iter().enumerate().map(|(i, &v)| {
                let ts = Timestamp {
                    minute: i as i32,
                    ..start
                };
                Sample::new(ts, v)
            }),
        )
    }

    fn build(values: &[f64], kind: ChartKind) -> ChartGeometry {
        let series = series(values);
        let domain = RangeCalculator::default().single(&series);
        ChartGeometryBuilder::default().build(
            "test".to_string(),
            &series,
            &domain,
            &Viewport::new(550.0, 350.0),
            kind,
        )
    }

    fn count(chart: &ChartGeometry, pred: fn(&GeometryPrimitive) -> bool) -> usize {
        chart.primitives.iter().filter(|p| pred(p)).count()
    }

    #[test]
    fn test_line_segments_and_markers() {
        let chart = build(&[1.0, 3.0, 2.0, 5.0], ChartKind::Line);
        assert_eq!(count(&chart, |p| matches!(p, GeometryPrimitive::Segment { .. })), 3);
        assert_eq!(count(&chart, |p| matches!(p, GeometryPrimitive::Point { .. })), 4);
        assert_eq!(chart.ticks.len(), 12);
        assert_eq!(chart.stats.unwrap().count, 4);

        // first segment ends where the second starts
        let segments: Vec<_> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                GeometryPrimitive::Segment { x1, x2, .. } => Some((*x1, *x2)),
                _ => None,
            })
            .collect();
        assert_eq!(segments[0].1, segments[1].0);
        assert!(segments[0].0 < segments[0].1);
    }

    #[test]
    fn test_points_stay_inside_plot_rect() {
        let chart = build(&[1.0, 3.0, 2.0, 5.0], ChartKind::Line);
        let rect = Viewport::new(550.0, 350.0).plot_rect();
        for primitive in &chart.primitives {
            if let GeometryPrimitive::Point { x, y, .. } = primitive {
                assert!(*x > rect.left && *x < rect.left + rect.width);
                assert!(*y > rect.top && *y < rect.bottom());
            }
        }
    }

    #[test]
    fn test_bar_width_and_height() {
        let chart = build(&[0.0, 10.0], ChartKind::Bar);
        let rect = Viewport::new(550.0, 350.0).plot_rect();
        let bars: Vec<_> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                GeometryPrimitive::Rect { y, w, h, .. } => Some((*y, *w, *h)),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 2);
        assert!((bars[0].1 - rect.width / 2.0 * 0.6).abs() < 1e-9);
        assert!(bars[1].2 > bars[0].2);
        // bar bottoms sit on the plot baseline
        for (y, _, h) in bars {
            assert!((y + h - rect.bottom()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scatter_radius_grows_with_value() {
        let chart = build(&[0.0, 5.0, 10.0], ChartKind::Scatter);
        let sizes: Vec<f64> = chart
            .primitives
            .iter()
            .filter_map(|p| match p {
                GeometryPrimitive::Point { size, .. } => Some(*size),
                _ => None,
            })
            .collect();
        assert_eq!(sizes.len(), 3);
        assert!(sizes[0] > 2.0 && sizes[0] < sizes[1] && sizes[1] < sizes[2]);
        assert!(sizes[2] < 4.0);
        assert!((sizes[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pie_has_sectors_and_total_without_ticks() {
        let chart = build(&[10.0, 10.0, 20.0], ChartKind::Pie);
        assert!(chart.ticks.is_empty());
        assert_eq!(count(&chart, |p| matches!(p, GeometryPrimitive::Sector { .. })), 2);

        let total = chart.primitives.iter().find_map(|p| match p {
            GeometryPrimitive::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(total.as_deref(), Some("Total: 3"));

        match &chart.primitives[0] {
            GeometryPrimitive::Sector {
                cx,
                cy,
                r,
                start_angle,
                end_angle,
                label,
                ..
            } => {
                assert_eq!((*cx, *cy), (275.0, 175.0));
                assert!((*r - 350.0 / 3.0).abs() < 1e-9);
                assert_eq!(*start_angle, 0.0);
                assert!((*end_angle - 2.0 * TAU / 3.0).abs() < 1e-12);
                assert_eq!(label.as_ref().unwrap().text, "10.0 (2)");
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_empty_series_yields_no_data_sentinel() {
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Pie, ChartKind::Scatter] {
            let chart = build(&[], kind);
            assert!(chart.ticks.is_empty());
            assert!(chart.stats.is_none());
            assert_eq!(chart.primitives.len(), 1);
            match &chart.primitives[0] {
                GeometryPrimitive::Sector {
                    start_angle,
                    end_angle,
                    color,
                    label,
                    ..
                } => {
                    assert_eq!(*start_angle, 0.0);
                    assert_eq!(*end_angle, TAU);
                    assert_eq!(*color, NEUTRAL);
                    assert_eq!(label.as_ref().unwrap().text, "no data");
                }
                other => panic!("unexpected primitive {other:?}"),
            }
        }
    }

    #[test]
    fn test_constant_series_scales_without_nan() {
        let chart = build(&[4.0, 4.0, 4.0], ChartKind::Scatter);
        for primitive in &chart.primitives {
            if let GeometryPrimitive::Point { x, y, size, .. } = primitive {
                assert!(x.is_finite() && y.is_finite() && size.is_finite());
            }
        }
    }
}
