use crate::color::Color;

/// Number of colors extracted when the caller does not ask otherwise.
pub const DEFAULT_COLOR_COUNT: usize = 5;

/// Muted tones used to top up short palettes and to replace failed extractions.
pub const FALLBACK_COLORS: [Color; 5] = [
    Color::new(120, 80, 60),
    Color::new(80, 120, 100),
    Color::new(100, 80, 120),
    Color::new(90, 90, 70),
    Color::new(70, 90, 90),
];

/// Ordered colors extracted from one wallpaper. Index 0 is the most dominant.
///
/// Never empty. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Wrap `colors` as a palette. An empty list becomes the default fallback.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            Self::fallback(DEFAULT_COLOR_COUNT)
        } else {
            Self { colors }
        }
    }

    /// `n` fallback tones, cycling through the fixed set.
    pub fn fallback(n: usize) -> Self {
        let colors = FALLBACK_COLORS.iter().copied().cycle().take(n.max(1)).collect();
        Self { colors }
    }

    /// Append fallback tones until the palette holds `n` colors.
    pub(crate) fn backfill(mut colors: Vec<Color>, n: usize) -> Self {
        let n = n.max(1);
        let missing = n.saturating_sub(colors.len());
        colors.extend(FALLBACK_COLORS.iter().copied().cycle().take(missing));
        colors.truncate(n);
        Self { colors }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    // A palette always holds at least one color.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn primary(&self) -> Color {
        self.colors[0]
    }

    /// Color at `index`, if the palette is that long.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Colors in `start..end`, shortened to what the palette holds.
    pub fn slice(&self, start: usize, end: usize) -> &[Color] {
        let end = end.min(self.colors.len());
        let start = start.min(end);
        &self.colors[start..end]
    }

    /// Color at index 1, or the primary dimmed by `factor` for one-color palettes.
    pub fn secondary_or(&self, factor: f64) -> Color {
        self.get(1)
            .unwrap_or_else(|| self.primary().adjust_brightness(factor))
    }

    /// Color at index 2, or the primary dimmed by `factor`.
    pub fn tertiary_or(&self, factor: f64) -> Color {
        self.get(2)
            .unwrap_or_else(|| self.primary().adjust_brightness(factor))
    }
}
