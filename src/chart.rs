use crate::config::Config;
use crate::ir::{GraphDataSource, GraphPoint, collect_points};
use crate::layout::{Layout, compute_layout};

/// Retained chart state: a data source, bounds, and a lazily rebuilt
/// layout cache.
///
/// Mirrors the host-view lifecycle: `reload_data` re-collects the point
/// list wholesale, `on_bounds_changed` picks up a resize, and any config
/// mutation goes through `update_config`. All three invalidate the cache;
/// the next `layout()` call rebuilds it. Single-threaded by design.
pub struct Chart {
    config: Config,
    source: Option<Box<dyn GraphDataSource>>,
    points: Vec<GraphPoint>,
    width: f64,
    height: f64,
    cached: Option<Layout>,
}

impl Chart {
    pub fn new(config: Config) -> Self {
        let width = config.render.width;
        let height = config.render.height;
        Self {
            config,
            source: None,
            points: Vec::new(),
            width,
            height,
            cached: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn points(&self) -> &[GraphPoint] {
        &self.points
    }

    /// Installs the data source and performs an initial load.
    pub fn set_data_source(&mut self, source: Box<dyn GraphDataSource>) {
        self.source = Some(source);
        self.reload_data();
    }

    /// Re-fetches every point from the data source. No incremental
    /// diffing; the list is rebuilt wholesale.
    pub fn reload_data(&mut self) {
        self.points = match &self.source {
            Some(source) => collect_points(source.as_ref()),
            None => Vec::new(),
        };
        self.cached = None;
    }

    pub fn on_bounds_changed(&mut self, width: f64, height: f64) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.cached = None;
        }
    }

    pub fn update_config(&mut self, mutate: impl FnOnce(&mut Config)) {
        mutate(&mut self.config);
        self.cached = None;
    }

    /// Current geometry, rebuilt only when data, bounds, or config
    /// changed since the last call.
    pub fn layout(&mut self) -> &Layout {
        self.cached.get_or_insert_with(|| {
            compute_layout(
                &self.points,
                &self.config.theme,
                &self.config.chart,
                self.width,
                self.height,
            )
        })
    }

    /// Renders the current geometry to an SVG document.
    pub fn to_svg(&mut self) -> String {
        let config = self.config.clone();
        crate::render::render_svg(self.layout(), &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SlicePoints;

    struct FixedPoints(Vec<GraphPoint>);

    impl GraphDataSource for FixedPoints {
        fn point_count(&self) -> i64 {
            SlicePoints(&self.0).point_count()
        }
        fn point_at(&self, index: usize) -> GraphPoint {
            self.0[index]
        }
    }

    fn chart_with(points: Vec<GraphPoint>) -> Chart {
        let mut chart = Chart::new(Config::default());
        chart.set_data_source(Box::new(FixedPoints(points)));
        chart
    }

    #[test]
    fn data_source_feeds_the_layout() {
        let mut chart = chart_with(vec![
            GraphPoint::new(75.0, 90.0, false),
            GraphPoint::new(51.0, 50.0, true),
            GraphPoint::new(56.0, 60.0, true),
        ]);
        assert_eq!(chart.layout().points.len(), 3);
    }

    #[test]
    fn layout_is_idempotent_for_unchanged_inputs() {
        let mut chart = chart_with(vec![GraphPoint::new(40.0, 60.0, false)]);
        let first = chart.layout().points[0].position;
        let second = chart.layout().points[0].position;
        assert_eq!(first, second);
    }

    #[test]
    fn bounds_change_invalidates_the_cache() {
        let mut chart = chart_with(vec![GraphPoint::new(100.0, 0.0, false)]);
        let before = chart.layout().center;
        chart.on_bounds_changed(200.0, 200.0);
        let after = chart.layout().center;
        assert_eq!(after.x, 100.0);
        assert_ne!(before.x, after.x);
    }

    #[test]
    fn config_mutation_invalidates_the_cache() {
        let mut chart = chart_with(vec![
            GraphPoint::new(10.0, 0.0, false),
            GraphPoint::new(20.0, 0.0, false),
        ]);
        assert!(!chart.layout().is_empty());
        chart.update_config(|config| config.chart.min_point_count = 3);
        assert!(chart.layout().is_empty());
    }

    #[test]
    fn without_a_source_nothing_renders() {
        let mut chart = Chart::new(Config::default());
        chart.reload_data();
        assert!(chart.layout().is_empty());
    }
}
