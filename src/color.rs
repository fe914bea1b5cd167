use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::PriceTier;

/// Colour of highlighted restaurants.
pub const HIGHLIGHT_COLOR: Color32 = Color32::RED;
/// Colour of every non-highlighted restaurant while highlighting is on.
pub const OTHER_COLOR: Color32 = Color32::GRAY;

/// 26-colour qualitative "Alphabet" palette.
const ALPHABET: [Color32; 26] = [
    Color32::from_rgb(0xAA, 0x0D, 0xFE),
    Color32::from_rgb(0x32, 0x83, 0xFE),
    Color32::from_rgb(0x85, 0x66, 0x0D),
    Color32::from_rgb(0x78, 0x2A, 0xB6),
    Color32::from_rgb(0x56, 0x56, 0x56),
    Color32::from_rgb(0x1C, 0x83, 0x56),
    Color32::from_rgb(0x16, 0xFF, 0x32),
    Color32::from_rgb(0xF7, 0xE1, 0xA0),
    Color32::from_rgb(0xE2, 0xE2, 0xE2),
    Color32::from_rgb(0x1C, 0xBE, 0x4F),
    Color32::from_rgb(0xC4, 0x45, 0x1C),
    Color32::from_rgb(0xDE, 0xA0, 0xFD),
    Color32::from_rgb(0xFE, 0x00, 0xFA),
    Color32::from_rgb(0x32, 0x5A, 0x9B),
    Color32::from_rgb(0xFE, 0xAF, 0x16),
    Color32::from_rgb(0xF8, 0xA1, 0x9F),
    Color32::from_rgb(0x90, 0xAD, 0x1C),
    Color32::from_rgb(0xF6, 0x22, 0x2E),
    Color32::from_rgb(0x1C, 0xFF, 0xCE),
    Color32::from_rgb(0x2E, 0xD9, 0xFF),
    Color32::from_rgb(0xB1, 0x0D, 0xA1),
    Color32::from_rgb(0xC0, 0x75, 0xA6),
    Color32::from_rgb(0xFC, 0x1C, 0xBF),
    Color32::from_rgb(0xB0, 0x00, 0x68),
    Color32::from_rgb(0xFB, 0xE4, 0x26),
    Color32::from_rgb(0xFA, 0x00, 0x87),
];

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

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
            to_color32(hsl.into_color())
        })
        .collect()
}

/// `n` category colours: the Alphabet palette first, then generated hues.
pub fn category_palette(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = ALPHABET.iter().copied().take(n).collect();
    colors.extend(generate_palette(n.saturating_sub(ALPHABET.len())));
    colors
}

// ---------------------------------------------------------------------------
// Color mapping: main category → Color32
// ---------------------------------------------------------------------------

/// Maps each main category of the full dataset to a fixed colour, so colours
/// stay put while filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build the map from the categories in first-appearance order.
    pub fn new(categories: &[String]) -> Self {
        let palette = category_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .zip(palette)
            .map(|(cat, c)| (cat.clone(), c))
            .collect();

        ColorMap {
            order: categories.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries (category → colour) in dataset order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|cat| (cat.clone(), self.color_for(cat)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Price shades and the score scale
// ---------------------------------------------------------------------------

const PRICE_HUE: f32 = 215.0;
const PRICE_LIGHTNESS: [f32; 4] = [0.80, 0.62, 0.44, 0.26];

/// One blue shade per tier, darker as the price goes up.
pub fn price_color(tier: PriceTier) -> Color32 {
    let hsl = Hsl::new(PRICE_HUE, 0.70, PRICE_LIGHTNESS[tier.rank()]);
    to_color32(hsl.into_color())
}

const SCORE_LOW: (u8, u8, u8) = (0xD7, 0x30, 0x27);
const SCORE_MID: (u8, u8, u8) = (0xFE, 0xE0, 0x8B);
const SCORE_HIGH: (u8, u8, u8) = (0x1A, 0x98, 0x50);

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Diverging red → yellow → green colour for a 0–100 score.
pub fn score_color(score: f64) -> Color32 {
    let t = (score / 100.0).clamp(0.0, 1.0) as f32;
    let mixed = if t <= 0.5 {
        linear(SCORE_LOW).mix(linear(SCORE_MID), t * 2.0)
    } else {
        linear(SCORE_MID).mix(linear(SCORE_HIGH), (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(mixed))
}
