use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::theme::Theme;

pub const DEFAULT_MAX_SCORE: f64 = 100.0;
pub const DEFAULT_MARKER_RADIUS: f64 = 4.0;
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Chart behavior knobs. All sizing values are normalized before layout;
/// see [`ChartConfig::normalized`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Score mapping to the ellipse boundary. Values at or below zero fall
    /// back to 100.
    pub max_score: f64,
    /// Fixed marker radius, independent of score. Clamped to > 0.
    pub point_marker_radius: f64,
    pub marker_stroke_width: f64,
    /// Ring stroke width. Clamped to > 0.
    pub line_width: f64,
    /// Below this point count the chart renders nothing. 1 is the lenient
    /// variant; 3 reproduces the strict `count > 2` guard.
    pub min_point_count: usize,
    pub use_background_conic_gradient: bool,
    pub use_per_segment_gradient_lines: bool,
    pub show_average_annotations: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            point_marker_radius: DEFAULT_MARKER_RADIUS,
            marker_stroke_width: 1.5,
            line_width: DEFAULT_LINE_WIDTH,
            min_point_count: 1,
            use_background_conic_gradient: true,
            use_per_segment_gradient_lines: false,
            show_average_annotations: false,
        }
    }
}

impl ChartConfig {
    /// Applies the documented fallbacks for out-of-range sizing values.
    /// Scores above `max_score` are intentionally not clamped anywhere.
    pub fn normalized(&self) -> ChartConfig {
        let mut cfg = self.clone();
        if cfg.max_score <= 0.0 {
            cfg.max_score = DEFAULT_MAX_SCORE;
        }
        if cfg.point_marker_radius <= 0.0 {
            cfg.point_marker_radius = DEFAULT_MARKER_RADIUS;
        }
        if cfg.line_width <= 0.0 {
            cfg.line_width = DEFAULT_LINE_WIDTH;
        }
        if cfg.marker_stroke_width <= 0.0 {
            cfg.marker_stroke_width = 1.5;
        }
        cfg
    }
}

/// Stop list and angular bounds for the conic background gradient.
///
/// When `colors` is empty the stop list is derived from the per-point
/// tier colors at layout time; an explicit list overrides that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientConfig {
    pub colors: Vec<Rgba>,
    /// Stop locations in `[0, 1]`, parallel to `colors`. A mismatched or
    /// empty list spreads the stops uniformly.
    pub locations: Vec<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            locations: Vec::new(),
            start_angle: -PI / 2.0,
            end_angle: 3.0 * PI / 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    /// Rounded-corner radius of the clip rect the gradient is confined to.
    pub corner_radius: f64,
    /// Optional image reference for average annotations; a hollow circle
    /// is drawn when absent.
    pub annotation_icon_href: Option<String>,
    pub annotation_icon_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            corner_radius: 0.0,
            annotation_icon_href: None,
            annotation_icon_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub chart: ChartConfig,
    pub gradient: GradientConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    ok_color: Option<Rgba>,
    warning_color: Option<Rgba>,
    danger_color: Option<Rgba>,
    marker_stroke_color: Option<Rgba>,
    line_color: Option<Rgba>,
    annotation_color: Option<Rgba>,
    background: Option<Rgba>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    max_score: Option<f64>,
    point_marker_radius: Option<f64>,
    marker_stroke_width: Option<f64>,
    line_width: Option<f64>,
    min_point_count: Option<usize>,
    use_background_conic_gradient: Option<bool>,
    use_per_segment_gradient_lines: Option<bool>,
    show_average_annotations: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GradientConfigFile {
    colors: Option<Vec<Rgba>>,
    locations: Option<Vec<f64>>,
    start_angle: Option<f64>,
    end_angle: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    corner_radius: Option<f64>,
    annotation_icon_href: Option<String>,
    annotation_icon_size: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    chart: Option<ChartConfigFile>,
    gradient: Option<GradientConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "default" || theme_name == "spider" {
            config.theme = Theme::spider_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.ok_color {
            config.theme.ok_color = v;
        }
        if let Some(v) = vars.warning_color {
            config.theme.warning_color = v;
        }
        if let Some(v) = vars.danger_color {
            config.theme.danger_color = v;
        }
        if let Some(v) = vars.marker_stroke_color {
            config.theme.marker_stroke_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.annotation_color {
            config.theme.annotation_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.max_score {
            config.chart.max_score = v;
        }
        if let Some(v) = chart.point_marker_radius {
            config.chart.point_marker_radius = v;
        }
        if let Some(v) = chart.marker_stroke_width {
            config.chart.marker_stroke_width = v;
        }
        if let Some(v) = chart.line_width {
            config.chart.line_width = v;
        }
        if let Some(v) = chart.min_point_count {
            config.chart.min_point_count = v;
        }
        if let Some(v) = chart.use_background_conic_gradient {
            config.chart.use_background_conic_gradient = v;
        }
        if let Some(v) = chart.use_per_segment_gradient_lines {
            config.chart.use_per_segment_gradient_lines = v;
        }
        if let Some(v) = chart.show_average_annotations {
            config.chart.show_average_annotations = v;
        }
    }

    if let Some(gradient) = parsed.gradient {
        if let Some(v) = gradient.colors {
            config.gradient.colors = v;
        }
        if let Some(v) = gradient.locations {
            config.gradient.locations = v;
        }
        if let Some(v) = gradient.start_angle {
            config.gradient.start_angle = v;
        }
        if let Some(v) = gradient.end_angle {
            config.gradient.end_angle = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.corner_radius {
            config.render.corner_radius = v;
        }
        if let Some(v) = render.annotation_icon_href {
            config.render.annotation_icon_href = Some(v);
        }
        if let Some(v) = render.annotation_icon_size {
            config.render.annotation_icon_size = v;
        }
    }

    Ok(config)
}
