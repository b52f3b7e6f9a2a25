use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::gradient::ConicGradient;
use crate::layout::{Layout, Point};

/// Renders the chart geometry to an SVG document.
///
/// Composition order follows the layout's z-order contract: the conic
/// background is clipped to the rounded view rect and masked to the ring
/// stroke plus dot shapes, segment gradients (or the flat ring) come
/// next, dot markers above those, annotations on top.
pub fn render_svg(layout: &Layout, config: &Config) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.theme.background
    ));

    if layout.is_empty() {
        svg.push_str("</svg>");
        return svg;
    }

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<clipPath id=\"chart-clip\"><rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" rx=\"{rx}\" ry=\"{rx}\"/></clipPath>",
        rx = config.render.corner_radius
    ));
    for (idx, segment) in layout.segments.iter().enumerate() {
        svg.push_str(&format!(
            "<linearGradient id=\"seg-{idx}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\">",
            segment.from.x, segment.from.y, segment.to.x, segment.to.y
        ));
        svg.push_str(&format!(
            "<stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/>",
            segment.from_color, segment.to_color
        ));
        svg.push_str("</linearGradient>");
    }
    if layout.background.is_some() {
        // The gradient shows only through the ring stroke and dot shapes.
        svg.push_str("<mask id=\"ring-mask\">");
        svg.push_str(&format!(
            "<rect width=\"{width}\" height=\"{height}\" fill=\"black\"/>"
        ));
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"white\" stroke-width=\"{}\"/>",
            points_to_path(&layout.ring),
            layout.line_width
        ));
        for point in &layout.points {
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"white\"/>",
                point.position.x, point.position.y, point.marker.radius
            ));
        }
        svg.push_str("</mask>");
    }
    svg.push_str("</defs>");

    if let Some(background) = &layout.background {
        let mut gradient = ConicGradient::from_config(&config.gradient);
        if config.gradient.colors.is_empty() {
            gradient.set_colors(background.colors.clone());
            gradient.set_locations(background.locations.clone());
        }
        // Circumscribe the view so strokes reach every corner; the clip
        // trims them back to the rounded rect.
        let radius = width.max(height) * std::f64::consts::SQRT_2;
        let strokes = gradient.radial_strokes(layout.center, radius);
        svg.push_str("<g clip-path=\"url(#chart-clip)\" mask=\"url(#ring-mask)\">");
        for stroke in &strokes {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                stroke.from.x, stroke.from.y, stroke.to.x, stroke.to.y, stroke.color
            ));
        }
        svg.push_str("</g>");
    }

    if !layout.segments.is_empty() {
        for (idx, segment) in layout.segments.iter().enumerate() {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"url(#seg-{idx})\" stroke-width=\"{}\" stroke-linecap=\"round\"/>",
                segment.from.x, segment.from.y, segment.to.x, segment.to.y, layout.line_width
            ));
        }
    } else if layout.background.is_none() {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            points_to_path(&layout.ring),
            config.theme.line_color,
            layout.line_width
        ));
    }

    for point in &layout.points {
        let marker = &point.marker;
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            marker.center.x,
            marker.center.y,
            marker.radius,
            marker.fill_color,
            marker.stroke_color,
            marker.stroke_width
        ));
    }

    for annotation in &layout.annotations {
        let size = config.render.annotation_icon_size;
        match &config.render.annotation_icon_href {
            Some(href) => {
                svg.push_str(&format!(
                    "<image href=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{size}\" height=\"{size}\"/>",
                    escape_xml(href),
                    annotation.position.x - size / 2.0,
                    annotation.position.y - size / 2.0,
                ));
            }
            None => {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>",
                    annotation.position.x,
                    annotation.position.y,
                    size / 2.0,
                    config.theme.annotation_color
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn points_to_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size =
        usvg::Size::from_wh(config.render.width as f32, config.render.height as f32)
            .unwrap_or(usvg::Size::from_wh(600.0, 600.0).unwrap());
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::GraphPoint;
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    fn scenario() -> Vec<GraphPoint> {
        vec![
            GraphPoint::new(75.0, 90.0, false),
            GraphPoint::new(69.0, 50.0, false),
            GraphPoint::new(100.0, 75.0, false),
            GraphPoint::new(51.0, 50.0, true),
            GraphPoint::new(56.0, 60.0, true),
        ]
    }

    fn render(config: &Config, points: &[GraphPoint]) -> String {
        let layout = compute_layout(
            points,
            &config.theme,
            &config.chart,
            config.render.width,
            config.render.height,
        );
        render_svg(&layout, config)
    }

    #[test]
    fn default_render_masks_the_conic_background() {
        let config = Config::default();
        let svg = render(&config, &scenario());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("mask id=\"ring-mask\""));
        assert!(svg.contains("clip-path=\"url(#chart-clip)\""));
        // No flat ring stroke when the gradient carries the line color.
        assert!(!svg.contains(&format!("stroke=\"{}\"", Theme::spider_default().line_color)));
    }

    #[test]
    fn dots_are_drawn_above_the_gradient_group() {
        let config = Config::default();
        let svg = render(&config, &scenario());
        let gradient_end = svg.find("</g>").expect("gradient group present");
        // Marker circles are the only elements stroked with the opaque
        // white marker color.
        let dot = svg.find("stroke=\"#FFFFFF\"").expect("marker dot present");
        assert!(dot > gradient_end);
    }

    #[test]
    fn per_segment_variant_emits_one_gradient_per_segment() {
        let mut config = Config::default();
        config.chart.use_background_conic_gradient = false;
        config.chart.use_per_segment_gradient_lines = true;
        let svg = render(&config, &scenario());
        for idx in 0..5 {
            assert!(svg.contains(&format!("linearGradient id=\"seg-{idx}\"")));
            assert!(svg.contains(&format!("stroke=\"url(#seg-{idx})\"")));
        }
        assert!(!svg.contains("ring-mask"));
    }

    #[test]
    fn flat_stroke_when_both_gradient_styles_are_off() {
        let mut config = Config::default();
        config.chart.use_background_conic_gradient = false;
        let svg = render(&config, &scenario());
        assert!(svg.contains(&format!("stroke=\"{}\"", config.theme.line_color)));
        assert!(!svg.contains("linearGradient"));
    }

    #[test]
    fn empty_layout_renders_background_only() {
        let config = Config::default();
        let svg = render(&config, &[]);
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<defs>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn annotations_render_icon_or_fallback_circle() {
        let mut config = Config::default();
        config.chart.show_average_annotations = true;
        let svg = render(&config, &scenario());
        assert!(svg.contains(&format!("stroke=\"{}\"", config.theme.annotation_color)));

        config.render.annotation_icon_href = Some("avg.png".to_string());
        let svg = render(&config, &scenario());
        assert!(svg.contains("<image href=\"avg.png\""));
    }

    #[test]
    fn strict_guard_produces_no_geometry_markup() {
        let mut config = Config::default();
        config.chart.min_point_count = 3;
        let svg = render(&config, &scenario()[..2]);
        assert!(!svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn escapes_xml_in_annotation_href() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
