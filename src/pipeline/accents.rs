use crate::color::Color;
use crate::theme::Palette;

const PRIMARY_FLOOR: f64 = 0.25;
const SECONDARY_FACTOR: f64 = 0.7;
const TERTIARY_FACTOR: f64 = 0.4;
const QUATERNARY_FACTOR: f64 = 0.2;

/// Four shades of the palette's most vibrant color, brightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accents {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub quaternary: Color,
}

impl Accents {
    /// Derive accents from the most vibrant palette color.
    ///
    /// The primary is raised to a lightness of at least 0.25 after it is
    /// chosen; the rest are the primary dimmed to 0.7, 0.4 and 0.2.
    pub fn from_palette(palette: &Palette) -> Self {
        let primary = most_vibrant(palette).ensure_minimum_brightness(PRIMARY_FLOOR);
        Self {
            primary,
            secondary: primary.adjust_brightness(SECONDARY_FACTOR),
            tertiary: primary.adjust_brightness(TERTIARY_FACTOR),
            quaternary: primary.adjust_brightness(QUATERNARY_FACTOR),
        }
    }
}

/// The palette color with the highest vibrancy; the first one wins ties,
/// and the primary wins when nothing has any vibrancy at all.
pub fn most_vibrant(palette: &Palette) -> Color {
    let mut best = palette.primary();
    let mut best_score = 0.0;
    for &color in palette.colors() {
        let score = color.vibrancy();
        if score > best_score {
            best_score = score;
            best = color;
        }
    }
    best
}
