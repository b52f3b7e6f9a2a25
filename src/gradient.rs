use std::cell::{Cell, RefCell};
use std::f64::consts::{FRAC_PI_2, PI};

use serde::Serialize;

use crate::color::Rgba;
use crate::config::GradientConfig;
use crate::layout::Point;

/// The interpolated region between two consecutive gradient stops.
#[derive(Debug, Clone, Copy)]
struct Transition {
    from_location: f64,
    to_location: f64,
    from_color: Rgba,
    to_color: Rgba,
}

impl Transition {
    fn color_for_percent(&self, percent: f64) -> Rgba {
        let range = self.to_location - self.from_location;
        let t = if range == 0.0 {
            0.0
        } else {
            (percent - self.from_location) / range
        };
        self.from_color.lerp(self.to_color, t)
    }
}

/// A straight segment from the circumscribing circle to the center,
/// carrying the color sampled at its angle.
#[derive(Debug, Clone, Serialize)]
pub struct RadialStroke {
    pub from: Point,
    pub to: Point,
    pub color: Rgba,
}

/// Conic (angular) gradient over `[start_angle, end_angle]`.
///
/// Stop locations are fractions of the configured angular span. The
/// pairwise transition list is cached and rebuilt lazily after any
/// mutation of colors, locations, or angles. With fewer than two colors
/// `color_at` falls back to a full-saturation hue spectrum.
#[derive(Debug)]
pub struct ConicGradient {
    colors: Vec<Rgba>,
    locations: Vec<f64>,
    start_angle: f64,
    end_angle: f64,
    transitions: RefCell<Vec<Transition>>,
    dirty: Cell<bool>,
}

impl Default for ConicGradient {
    fn default() -> Self {
        Self::new()
    }
}

impl ConicGradient {
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            locations: Vec::new(),
            start_angle: -PI / 2.0,
            end_angle: 3.0 * PI / 2.0,
            transitions: RefCell::new(Vec::new()),
            dirty: Cell::new(true),
        }
    }

    pub fn from_config(config: &GradientConfig) -> Self {
        let mut gradient = Self::new();
        gradient.set_colors(config.colors.clone());
        gradient.set_locations(config.locations.clone());
        gradient.set_angles(config.start_angle, config.end_angle);
        gradient
    }

    pub fn set_colors(&mut self, colors: Vec<Rgba>) {
        self.colors = colors;
        self.dirty.set(true);
    }

    pub fn set_locations(&mut self, locations: Vec<f64>) {
        self.locations = locations;
        self.dirty.set(true);
    }

    pub fn set_angles(&mut self, start_angle: f64, end_angle: f64) {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self.dirty.set(true);
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// Angular width of the configured domain.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// The angle at which a stop location in `[0, 1]` sits.
    pub fn angle_at(&self, location: f64) -> f64 {
        self.start_angle + location * self.span()
    }

    fn percent_for(&self, angle: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        (angle - self.start_angle) / span
    }

    fn ensure_transitions(&self) {
        if !self.dirty.get() {
            return;
        }
        let mut cache = self.transitions.borrow_mut();
        cache.clear();
        if self.colors.len() > 1 {
            let count = self.colors.len() - 1;
            let uniform_step = 1.0 / count as f64;
            let explicit = self.locations.len() == self.colors.len();
            for i in 0..count {
                let (from_location, to_location) = if explicit {
                    (self.locations[i], self.locations[i + 1])
                } else {
                    (uniform_step * i as f64, uniform_step * (i + 1) as f64)
                };
                cache.push(Transition {
                    from_location,
                    to_location,
                    from_color: self.colors[i],
                    to_color: self.colors[i + 1],
                });
            }
        }
        drop(cache);
        self.dirty.set(false);
    }

    /// Color implied by the stop sequence at `angle`. Accepts the full
    /// configured range; a percent landing in no transition (1.0 exactly,
    /// or float drift past a boundary) falls back to the first transition
    /// below the midpoint and the last above it.
    pub fn color_at(&self, angle: f64) -> Rgba {
        self.ensure_transitions();
        let percent = self.percent_for(angle);
        let transitions = self.transitions.borrow();
        if transitions.is_empty() {
            return Rgba::from_hsb(percent.clamp(0.0, 1.0), 1.0, 1.0);
        }
        let matched = transitions
            .iter()
            .find(|t| percent >= t.from_location && percent < t.to_location)
            .copied();
        let transition = matched.unwrap_or_else(|| {
            if percent <= 0.5 {
                transitions[0]
            } else {
                transitions[transitions.len() - 1]
            }
        });
        transition.color_for_percent(percent)
    }

    /// Approximates the conic gradient as dense radial strokes from the
    /// circle of `radius` to `center`, stepping `(π/2) / radius` so angular
    /// resolution stays roughly constant in arc length. Callers clip the
    /// strokes to the consuming shape; this never computes the clip.
    pub fn radial_strokes(&self, center: Point, radius: f64) -> Vec<RadialStroke> {
        if radius <= 0.0 || self.span() <= 0.0 {
            return Vec::new();
        }
        let step = FRAC_PI_2 / radius;
        let mut strokes = Vec::new();
        let mut angle = self.start_angle;
        while angle <= self.end_angle {
            let from = Point {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            };
            strokes.push(RadialStroke {
                from,
                to: center,
                color: self.color_at(angle),
            });
            angle += step;
        }
        strokes
    }
}
