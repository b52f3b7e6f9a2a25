pub mod chart;
#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod gradient;
pub mod ir;
pub mod layout;
pub mod render;
pub mod theme;

pub use chart::Chart;
#[cfg(feature = "cli")]
pub use cli::run;
pub use color::Rgba;
pub use config::{ChartConfig, Config, GradientConfig, RenderConfig, load_config};
pub use gradient::ConicGradient;
pub use ir::{GraphDataSource, GraphPoint, SlicePoints, Tier, collect_points, parse_points};
pub use layout::{Layout, Point, compute_layout};
pub use render::render_svg;
pub use theme::Theme;
