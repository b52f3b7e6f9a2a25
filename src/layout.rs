use std::f64::consts::PI;

use serde::Serialize;

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::ir::{GraphPoint, Tier};
use crate::theme::Theme;

/// Point 0 sits at 12 o'clock.
pub const START_ANGLE: f64 = -PI / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A renderable circle/arc primitive, one per point marker.
#[derive(Debug, Clone, Serialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
    pub stroke_width: f64,
    pub stroke_color: Rgba,
    pub fill_color: Rgba,
}

impl Arc {
    pub fn circle(
        center: Point,
        radius: f64,
        stroke_width: f64,
        stroke_color: Rgba,
        fill_color: Rgba,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            end_angle: PI * 2.0,
            clockwise: true,
            stroke_width,
            stroke_color,
            fill_color,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointLayout {
    pub index: usize,
    pub angle: f64,
    pub position: Point,
    pub tier: Tier,
    pub color: Rgba,
    pub marker: Arc,
}

/// One ring segment rendered as an independently bounded two-color
/// gradient line between consecutive points.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentLayout {
    pub from: Point,
    pub to: Point,
    pub from_color: Rgba,
    pub to_color: Rgba,
}

/// Average-value annotation: same angle as the data point, radius scaled
/// by `average / max_score` instead of `score / max_score`.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationLayout {
    pub index: usize,
    pub position: Point,
}

/// Stop list for the masked conic background, derived from the per-point
/// tier colors so each point's sector is centered on its own color.
#[derive(Debug, Clone, Serialize)]
pub struct BackgroundStops {
    pub colors: Vec<Rgba>,
    pub locations: Vec<f64>,
}

/// Render-ready chart geometry.
///
/// Z-order contract for consumers: conic background (masked to ring and
/// dot shapes, clipped to the view rect), then segment gradient lines or
/// the flat ring stroke, then dot markers, then annotations.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub points: Vec<PointLayout>,
    /// Closed polyline; when non-empty the first vertex is repeated last.
    pub ring: Vec<Point>,
    pub segments: Vec<SegmentLayout>,
    pub annotations: Vec<AnnotationLayout>,
    pub background: Option<BackgroundStops>,
    pub line_width: f64,
}

impl Layout {
    fn empty(width: f64, height: f64, line_width: f64) -> Self {
        Self {
            width,
            height,
            center: Point {
                x: width / 2.0,
                y: height / 2.0,
            },
            points: Vec::new(),
            ring: Vec::new(),
            segments: Vec::new(),
            annotations: Vec::new(),
            background: None,
            line_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn ellipse_point(center: Point, factor: f64, angle: f64) -> Point {
    Point {
        x: center.x + center.x * factor * angle.cos(),
        y: center.y + center.y * factor * angle.sin(),
    }
}

/// Places `points` evenly around the ellipse inscribed in
/// `width x height`, classifies each by tier, and emits ring, markers,
/// and the optional gradient/annotation geometry.
///
/// Degenerate input is a designed no-op: an empty list, or fewer points
/// than `config.min_point_count`, yields an empty layout and no error.
/// Scores above `max_score` are not clamped and land outside the nominal
/// boundary.
pub fn compute_layout(
    points: &[GraphPoint],
    theme: &Theme,
    config: &ChartConfig,
    width: f64,
    height: f64,
) -> Layout {
    let config = config.normalized();
    let n = points.len();
    if n == 0 || n < config.min_point_count {
        return Layout::empty(width, height, config.line_width);
    }

    let mut layout = Layout::empty(width, height, config.line_width);
    let center = layout.center;
    let delta = PI * 2.0 / n as f64;

    for (index, point) in points.iter().enumerate() {
        let angle = START_ANGLE + index as f64 * delta;
        let tier = Tier::of(point);
        let color = theme.tier_color(tier);
        let score_factor = point.score / config.max_score;
        let position = ellipse_point(center, score_factor, angle);
        let marker = Arc::circle(
            position,
            config.point_marker_radius,
            config.marker_stroke_width,
            theme.marker_stroke_color,
            color,
        );
        layout.ring.push(position);
        layout.points.push(PointLayout {
            index,
            angle,
            position,
            tier,
            color,
            marker,
        });

        if config.show_average_annotations {
            let average_factor = point.average / config.max_score;
            layout.annotations.push(AnnotationLayout {
                index,
                position: ellipse_point(center, average_factor, angle),
            });
        }
    }
    // Close the loop back to point 0.
    layout.ring.push(layout.ring[0]);

    if config.use_per_segment_gradient_lines {
        for i in 0..n {
            let next = (i + 1) % n;
            layout.segments.push(SegmentLayout {
                from: layout.points[i].position,
                to: layout.points[next].position,
                from_color: layout.points[i].color,
                to_color: layout.points[next].color,
            });
        }
    }

    if config.use_background_conic_gradient {
        layout.background = Some(background_stops(&layout.points));
    }

    layout
}

/// Tier colors plus the first color repeated, with locations placing the
/// first and last half-width sectors at the span boundaries: 1/(2N), then
/// N-1 steps of 1/N, then a final 1/(2N) landing at 1.0.
fn background_stops(points: &[PointLayout]) -> BackgroundStops {
    let n = points.len();
    let mut colors: Vec<Rgba> = points.iter().map(|p| p.color).collect();
    colors.push(colors[0]);

    let half = 1.0 / (2.0 * n as f64);
    let step = 1.0 / n as f64;
    let mut locations = Vec::with_capacity(n + 1);
    locations.push(half);
    for _ in 1..n {
        locations.push(locations[locations.len() - 1] + step);
    }
    locations.push(locations[locations.len() - 1] + half);
    BackgroundStops { colors, locations }
}
