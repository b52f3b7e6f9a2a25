use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::ir::Tier;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub ok_color: Rgba,
    pub warning_color: Rgba,
    pub danger_color: Rgba,
    /// Contrasting stroke drawn around every point marker.
    pub marker_stroke_color: Rgba,
    /// Ring stroke used when no gradient coloring is active.
    pub line_color: Rgba,
    pub annotation_color: Rgba,
    pub background: Rgba,
}

impl Theme {
    pub fn spider_default() -> Self {
        Self {
            ok_color: Rgba::from_hex(0x0FA45A),
            warning_color: Rgba::from_hex(0xF6AA42),
            danger_color: Rgba::from_hex(0xDA0032),
            marker_stroke_color: Rgba::WHITE,
            line_color: Rgba::BLACK,
            annotation_color: Rgba::from_hex(0x4A4A4A),
            background: Rgba::WHITE,
        }
    }

    pub fn modern() -> Self {
        Self {
            ok_color: Rgba::from_hex(0x22C55E),
            warning_color: Rgba::from_hex(0xF59E0B),
            danger_color: Rgba::from_hex(0xEF4444),
            marker_stroke_color: Rgba::WHITE,
            line_color: Rgba::from_hex(0x1C2430),
            annotation_color: Rgba::from_hex(0x7A8AA6),
            background: Rgba::WHITE,
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Rgba {
        match tier {
            Tier::Ok => self.ok_color,
            Tier::Warning => self.warning_color,
            Tier::Danger => self.danger_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::spider_default()
    }
}
