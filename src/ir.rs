use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One measured quantity on the chart.
///
/// `score` drives radial placement, `average` drives threshold coloring
/// (and the optional annotation radius), `is_priority` forces the danger
/// tier regardless of score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    pub score: f64,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub is_priority: bool,
}

impl GraphPoint {
    pub fn new(score: f64, average: f64, is_priority: bool) -> Self {
        Self {
            score,
            average,
            is_priority,
        }
    }
}

/// Classification tier assigned to a point by the priority/threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Ok,
    Warning,
    Danger,
}

impl Tier {
    /// Pure classification: priority always wins, then `score < average`
    /// marks warning, everything else is ok.
    pub fn of(point: &GraphPoint) -> Tier {
        if point.is_priority {
            Tier::Danger
        } else if point.score < point.average {
            Tier::Warning
        } else {
            Tier::Ok
        }
    }
}

/// Supplier of chart data, queried once per reload pass.
///
/// `point_count` may report a negative value; consumers clamp it to zero
/// rather than erroring.
pub trait GraphDataSource {
    fn point_count(&self) -> i64;
    fn point_at(&self, index: usize) -> GraphPoint;
}

/// Adapter exposing any point slice as a data source.
pub struct SlicePoints<'a>(pub &'a [GraphPoint]);

impl GraphDataSource for SlicePoints<'_> {
    fn point_count(&self) -> i64 {
        self.0.len() as i64
    }

    fn point_at(&self, index: usize) -> GraphPoint {
        self.0[index]
    }
}

/// Drains the data source into an owned point list. Negative counts are
/// clamped to zero.
pub fn collect_points(source: &dyn GraphDataSource) -> Vec<GraphPoint> {
    let count = source.point_count().max(0) as usize;
    (0..count).map(|idx| source.point_at(idx)).collect()
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read points file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid points data: {0}")]
    Parse(String),
}

/// Parses a point list from JSON or JSON5 text.
///
/// Accepts either a bare array or an object with a `points` array, so
/// fixture files can carry sibling metadata.
pub fn parse_points(input: &str) -> Result<Vec<GraphPoint>, DataError> {
    #[derive(Deserialize)]
    struct PointsFile {
        points: Vec<GraphPoint>,
    }

    if let Ok(points) = json5::from_str::<Vec<GraphPoint>>(input) {
        return Ok(points);
    }
    json5::from_str::<PointsFile>(input)
        .map(|file| file.points)
        .map_err(|err| DataError::Parse(err.to_string()))
}
