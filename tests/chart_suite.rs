use std::path::{Path, PathBuf};

use spidergraph_renderer::{Config, Tier, compute_layout, parse_points, render_svg};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> Vec<spidergraph_renderer::GraphPoint> {
    let path = fixture_root().join(name);
    assert!(path.exists(), "fixture missing: {}", name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_points(&input).expect("fixture parse failed")
}

fn render_fixture(name: &str, config: &Config) -> String {
    let points = load_fixture(name);
    let layout = compute_layout(
        &points,
        &config.theme,
        &config.chart,
        config.render.width,
        config.render.height,
    );
    render_svg(&layout, config)
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic.json",
        "empty.json",
        "two_points.json",
        "overmax.json",
        "wrapped.json5",
    ];
    let config = Config::default();
    for name in candidates {
        let svg = render_fixture(name, &config);
        assert_valid_svg(&svg, name);
    }
}

#[test]
fn basic_fixture_matches_documented_scenario() {
    let points = load_fixture("basic.json");
    let config = Config::default();
    let layout = compute_layout(&points, &config.theme, &config.chart, 300.0, 300.0);

    let tiers: Vec<Tier> = layout.points.iter().map(|p| p.tier).collect();
    assert_eq!(
        tiers,
        vec![
            Tier::Warning,
            Tier::Ok,
            Tier::Ok,
            Tier::Danger,
            Tier::Danger
        ]
    );
    let expected_degrees = [-90.0, -18.0, 54.0, 126.0, 198.0];
    for (point, expected) in layout.points.iter().zip(expected_degrees) {
        assert!((point.angle.to_degrees() - expected).abs() < 1e-6);
    }
}

#[test]
fn empty_fixture_renders_without_geometry() {
    let svg = render_fixture("empty.json", &Config::default());
    assert_valid_svg(&svg, "empty.json");
    assert!(!svg.contains("<circle"));
    assert!(!svg.contains("<path"));
}

#[test]
fn strict_variant_skips_below_minimum() {
    let mut config = Config::default();
    config.chart.min_point_count = 3;
    let svg = render_fixture("two_points.json", &config);
    assert_valid_svg(&svg, "two_points.json");
    assert!(!svg.contains("<circle"));

    // The lenient default draws the degenerate chart.
    let svg = render_fixture("two_points.json", &Config::default());
    assert!(svg.contains("<circle"));
}

#[test]
fn overmax_scores_place_points_outside_the_view() {
    let points = load_fixture("overmax.json");
    let config = Config::default();
    let layout = compute_layout(&points, &config.theme, &config.chart, 300.0, 300.0);
    // Point 0 at 12 o'clock with score 150/100 lands above the view.
    assert!(layout.points[0].position.y < 0.0);
    // Rendering must still succeed.
    assert_valid_svg(&render_svg(&layout, &config), "overmax.json");
}

#[test]
fn per_segment_variant_renders_every_segment_gradient() {
    let mut config = Config::default();
    config.chart.use_background_conic_gradient = false;
    config.chart.use_per_segment_gradient_lines = true;
    let svg = render_fixture("basic.json", &config);
    for idx in 0..5 {
        assert!(
            svg.contains(&format!("url(#seg-{idx})")),
            "missing segment gradient {idx}"
        );
    }
}

#[test]
fn wrapped_json5_fixture_parses_and_classifies() {
    let points = load_fixture("wrapped.json5");
    assert_eq!(points.len(), 3);
    assert_eq!(Tier::of(&points[0]), Tier::Warning);
    assert_eq!(Tier::of(&points[1]), Tier::Ok);
    assert_eq!(Tier::of(&points[2]), Tier::Danger);
}
