//! Deterministic channel color assignment.

use serde::{Deserialize, Serialize};
use std::fmt;

const SATURATION: f32 = 70.0;
const LIGHTNESS: f32 = 60.0;

/// An HSL color, rendered in CSS notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round(),
            self.saturation.round(),
            self.lightness.round()
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

/// Evenly spaced hues for `count` series.
///
/// Pure function of the count: the same dataset always gets the same
/// palette, which is what makes repeated renders visually stable.
pub fn channel_palette(count: usize) -> Vec<Hsl> {
    if count == 0 {
        return Vec::new();
    }
    let hue_step = 360.0 / count as f32;
    (0..count)
        .map(|i| Hsl {
            hue: (i as f32 * hue_step) % 360.0,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        })
        .collect()
}

/// Black-or-white foreground for a hex background, using the WCAG relative
/// luminance formula. Returns `None` for an unparseable color.
pub fn text_color_for(background_hex: &str) -> Option<&'static str> {
    let (r, g, b) = hex_to_rgb(background_hex)?;
    let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
    Some(if luminance > 0.5 { "#000000" } else { "#ffffff" })
}

/// Parse `#RGB` or `#RRGGBB`, with or without the hash.
fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(channel_palette(8), channel_palette(8));
    }

    #[test]
    fn palette_colors_are_distinct() {
        let css: HashSet<String> = channel_palette(32).iter().map(Hsl::to_css).collect();
        assert_eq!(css.len(), 32);
    }

    #[test]
    fn hues_are_evenly_spaced() {
        let palette = channel_palette(4);
        assert_eq!(palette[0].hue, 0.0);
        assert_eq!(palette[1].hue, 90.0);
        assert_eq!(palette[2].hue, 180.0);
        assert_eq!(palette[3].hue, 270.0);
    }

    #[test]
    fn zero_channels_yield_an_empty_palette() {
        assert!(channel_palette(0).is_empty());
    }

    #[test]
    fn light_backgrounds_get_dark_text() {
        assert_eq!(text_color_for("#FFFFFF"), Some("#000000"));
        assert_eq!(text_color_for("#1F2937"), Some("#ffffff"));
        assert_eq!(text_color_for("fff"), Some("#000000"));
        assert_eq!(text_color_for("#12"), None);
        assert_eq!(text_color_for("not-a-color"), None);
    }
}
