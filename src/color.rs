use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Category, Manufacturer};

// ---------------------------------------------------------------------------
// Color palette generator
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

// ---------------------------------------------------------------------------
// Color mapping: series key → Color32
// ---------------------------------------------------------------------------

/// Maps each value of a fixed vocabulary to a distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Copy> ColorMap<K> {
    pub fn new(keys: &[K]) -> Self {
        let mapping = keys
            .iter()
            .copied()
            .zip(generate_palette(keys.len()))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, key: &K) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}

/// Colours for every series the dashboard draws. The vocabularies are fixed,
/// so a series keeps its colour regardless of the active filters.
#[derive(Debug, Clone)]
pub struct Palette {
    pub categories: ColorMap<Category>,
    pub manufacturers: ColorMap<Manufacturer>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            categories: ColorMap::new(&Category::ALL),
            manufacturers: ColorMap::new(&Manufacturer::ALL),
        }
    }
}
