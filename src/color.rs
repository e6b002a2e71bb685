use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse a `#RRGGBB` hex string.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

/// Parse a palette entry, falling back to gray so a typo in a config file
/// degrades one group's color rather than the whole render.
pub fn hex_or_gray(hex: &str) -> Color32 {
    parse_hex(hex).unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Generated palette for the color-by-category view
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Maps source-category labels to distinct colours. The meta groups carry
/// fixed palettes; this covers the fine-grained color-by-category view
/// where the label set depends on the loaded file.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted set of category labels, so the
    /// assignment is stable across runs on the same data.
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (label → colour) in label order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, color)| (label.clone(), *color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_fixed_palettes() {
        assert_eq!(parse_hex("#f44336"), Some(Color32::from_rgb(0xf4, 0x43, 0x36)));
        assert_eq!(parse_hex("#2196F3"), Some(Color32::from_rgb(0x21, 0x96, 0xF3)));
        assert_eq!(parse_hex("4CAF50"), Some(Color32::from_rgb(0x4C, 0xAF, 0x50)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex("#f4433"), None);
        assert_eq!(parse_hex("#ggling"), None);
        assert_eq!(hex_or_gray("nonsense"), Color32::GRAY);
    }

    #[test]
    fn generated_palette_colors_are_distinct() {
        let palette = generate_palette(13);
        let unique: BTreeSet<_> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 13);
    }

    #[test]
    fn color_map_is_stable_for_known_labels() {
        let labels: BTreeSet<String> = ["Beef Products", "Snacks"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let map = ColorMap::new(&labels);
        assert_eq!(map.color_for("Snacks"), map.color_for("Snacks"));
        assert_eq!(map.color_for("Unknown"), Color32::GRAY);
    }
}
