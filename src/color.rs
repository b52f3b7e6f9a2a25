use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

static RGBA_FUNC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([0-9.]+)\s*)?\)$").unwrap()
});

/// RGBA color with channels in `[0, 1]`.
///
/// Interpolation is unclamped so out-of-range blends stay linear; values
/// are clamped only when formatting to CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f64 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f64 / 255.0,
            b: (rgb & 0xFF) as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(...)` and `rgba(...)`.
    pub fn parse(input: &str) -> Option<Rgba> {
        let input = input.trim();
        if HEX_COLOR.is_match(input) {
            let digits = &input[1..];
            return match digits.len() {
                3 => {
                    let mut ch = [0.0_f64; 3];
                    for (slot, d) in ch.iter_mut().zip(digits.chars()) {
                        let v = d.to_digit(16)? as f64;
                        // #abc expands to #aabbcc
                        *slot = (v * 16.0 + v) / 255.0;
                    }
                    Some(Rgba::new(ch[0], ch[1], ch[2], 1.0))
                }
                6 => {
                    let packed = u32::from_str_radix(digits, 16).ok()?;
                    Some(Rgba::from_hex(packed))
                }
                8 => {
                    let packed = u32::from_str_radix(digits, 16).ok()?;
                    let mut color = Rgba::from_hex(packed >> 8);
                    color.a = (packed & 0xFF) as f64 / 255.0;
                    Some(color)
                }
                _ => None,
            };
        }
        if let Some(caps) = RGBA_FUNC.captures(input) {
            let channel = |i: usize| -> Option<f64> {
                let v: u32 = caps.get(i)?.as_str().parse().ok()?;
                Some(v.min(255) as f64 / 255.0)
            };
            let a = match caps.get(4) {
                Some(m) => m.as_str().parse::<f64>().ok()?,
                None => 1.0,
            };
            return Some(Rgba::new(channel(1)?, channel(2)?, channel(3)?, a));
        }
        None
    }

    /// Linear interpolation toward `other`. `t` is not clamped.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Color from hue/saturation/brightness, hue as a fraction of a turn.
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Rgba {
        let h = ((hue % 1.0) + 1.0) % 1.0 * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (r, g, b) = match sector as i64 % 6 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Rgba::new(r, g, b, 1.0)
    }

    /// CSS form: `#RRGGBB` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!(
                "rgba({}, {}, {}, {})",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                alpha
            )
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgba::parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid color: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse("#FF0000"), Some(Rgba::from_hex(0xFF0000)));
        let half_red = Rgba::parse("#FF000080").unwrap();
        assert_eq!(half_red.r, 1.0);
        assert!((half_red.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(Rgba::parse("rgb(255, 0, 0)"), Some(Rgba::from_hex(0xFF0000)));
        let c = Rgba::parse("rgba(0, 0, 255, 0.5)").unwrap();
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Rgba::parse("nope"), None);
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("rgb(1, 2)"), None);
    }

    #[test]
    fn lerp_midpoint_blends_channels() {
        let mid = Rgba::from_hex(0xFF0000).lerp(Rgba::from_hex(0x0000FF), 0.5);
        assert_eq!(mid, Rgba::new(0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn hsb_primaries() {
        let close = |a: Rgba, b: Rgba| {
            (a.r - b.r).abs() < 1e-9
                && (a.g - b.g).abs() < 1e-9
                && (a.b - b.b).abs() < 1e-9
        };
        assert!(close(Rgba::from_hsb(0.0, 1.0, 1.0), Rgba::from_hex(0xFF0000)));
        assert!(close(Rgba::from_hsb(1.0 / 3.0, 1.0, 1.0), Rgba::from_hex(0x00FF00)));
        assert!(close(Rgba::from_hsb(2.0 / 3.0, 1.0, 1.0), Rgba::from_hex(0x0000FF)));
    }

    #[test]
    fn css_output_round_trips() {
        for css in ["#0FA45A", "#DA0032", "#F6AA42"] {
            assert_eq!(Rgba::parse(css).unwrap().to_css(), css);
        }
        assert_eq!(
            Rgba::new(1.0, 0.0, 0.0, 0.5).to_css(),
            "rgba(255, 0, 0, 0.5)"
        );
    }

    #[test]
    fn serde_uses_css_strings() {
        let json = serde_json::to_string(&Rgba::from_hex(0x0FA45A)).unwrap();
        assert_eq!(json, "\"#0FA45A\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::from_hex(0x0FA45A));
    }
}
