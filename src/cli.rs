use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::{Config, load_config};
use crate::ir::parse_points;
use crate::layout::compute_layout;
use crate::render::{render_svg, write_output_svg};

#[derive(Parser, Debug, Default)]
#[command(name = "sgr", version, about = "Radial spider chart renderer")]
pub struct Args {
    /// Points file (JSON/JSON5 array of {score, average, isPriority}) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (camelCase theme/chart/gradient/render sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Color each ring segment with its own two-color gradient
    #[arg(long = "segmentGradients")]
    pub segment_gradients: bool,

    /// Disable the masked conic background gradient
    #[arg(long = "noConicBackground")]
    pub no_conic_background: bool,

    /// Draw average-value annotations
    #[arg(long = "annotations")]
    pub annotations: bool,

    /// Minimum point count required to draw anything
    #[arg(long = "minPoints")]
    pub min_points: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let input = read_input(args.input.as_deref())?;
    let points = parse_points(&input)?;
    let layout = compute_layout(
        &points,
        &config.theme,
        &config.chart,
        config.render.width,
        config.render.height,
    );
    let svg = render_svg(&layout, &config);

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let output = ensure_output(&args.output, "png")?;
                crate::render::write_output_png(&svg, &output, &config)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "PNG support not compiled in; rebuild with the \"png\" feature"
            ));
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.segment_gradients {
        config.chart.use_per_segment_gradient_lines = true;
    }
    if args.no_conic_background {
        config.chart.use_background_conic_gradient = false;
    }
    if args.annotations {
        config.chart.show_average_annotations = true;
    }
    if let Some(min_points) = args.min_points {
        config.chart.min_point_count = min_points;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_win_over_config_defaults() {
        let mut config = Config::default();
        let args = Args {
            width: Some(320.0),
            segment_gradients: true,
            no_conic_background: true,
            annotations: true,
            min_points: Some(3),
            ..Args::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.render.width, 320.0);
        assert!(config.chart.use_per_segment_gradient_lines);
        assert!(!config.chart.use_background_conic_gradient);
        assert!(config.chart.show_average_annotations);
        assert_eq!(config.chart.min_point_count, 3);
    }

    #[test]
    fn absent_flags_leave_config_untouched() {
        let mut config = Config::default();
        apply_overrides(&mut config, &Args::default());
        assert_eq!(config.render.width, 600.0);
        assert!(config.chart.use_background_conic_gradient);
        assert!(!config.chart.use_per_segment_gradient_lines);
    }
}
