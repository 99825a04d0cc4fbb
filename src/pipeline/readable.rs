use crate::color::{ensure_text_contrast, Color};

/// Lightness levels swept per accent, brightest first.
const LIGHTNESS_SWEEP: [f64; 19] = [
    0.95, 0.9, 0.85, 0.8, 0.75, 0.7, 0.65, 0.6, 0.55, 0.5, 0.45, 0.4, 0.35, 0.3, 0.25, 0.2, 0.15,
    0.1, 0.05,
];

/// Background luminance below which text is pushed bright.
const DARK_BACKGROUND: f64 = 0.3;
/// Background luminance above which text is pushed dark.
const LIGHT_BACKGROUND: f64 = 0.7;

/// Inverted accents are only tried at or below this contrast floor.
const INVERTED_MAX_CONTRAST: f64 = 3.0;
const INVERTED_BRIGHT: f64 = 0.8;
const INVERTED_DARK: f64 = 0.2;
const INVERTED_SATURATION_BOOST: f64 = 2.0;
/// Inverted accents outrank every sweep candidate.
const INVERTED_WEIGHT: f64 = 2.0;

const SWEEP_SATURATION_BOOST: f64 = 1.6;
const SWEEP_FLOOR_ON_DARK: f64 = 0.4;
const SWEEP_CEILING_ON_LIGHT: f64 = 0.3;

/// What a text color has to satisfy.
#[derive(Debug, Clone, Copy)]
pub struct ContrastRequirement<'a> {
    pub background: Color,
    pub accents: &'a [Color],
    /// WCAG ratio floor, 1.0 to 21.0.
    pub min_contrast: f64,
    pub prefer_color: bool,
}

impl<'a> ContrastRequirement<'a> {
    pub fn new(background: Color, accents: &'a [Color], min_contrast: f64) -> Self {
        Self {
            background,
            accents,
            min_contrast,
            prefer_color: true,
        }
    }

    pub fn prefer_color(mut self, prefer: bool) -> Self {
        self.prefer_color = prefer;
        self
    }

    pub fn resolve(&self) -> Color {
        create_readable_text_color(
            self.background,
            self.accents,
            self.min_contrast,
            self.prefer_color,
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    color: Color,
    contrast: f64,
    distance: f64,
}

/// Pick a text color for `background` derived from `accents` that meets
/// `min_contrast`, leaning toward colorful results when `prefer_color` is set.
///
/// Falls back to plain white or black when no accent variant passes.
pub fn create_readable_text_color(
    background: Color,
    accents: &[Color],
    min_contrast: f64,
    prefer_color: bool,
) -> Color {
    let bg_luminance = background.relative_luminance();
    let mut candidates = Vec::new();

    if prefer_color && min_contrast <= INVERTED_MAX_CONTRAST {
        let target = if bg_luminance < DARK_BACKGROUND {
            INVERTED_BRIGHT
        } else {
            INVERTED_DARK
        };
        for accent in accents {
            let (h, _, s) = accent.to_hls();
            let color = Color::from_hls(h, target, (s * INVERTED_SATURATION_BOOST).min(1.0));
            let contrast = Color::contrast_ratio(&background, &color);
            if contrast >= min_contrast {
                candidates.push(Candidate {
                    color,
                    contrast,
                    distance: INVERTED_WEIGHT,
                });
            }
        }
    }

    for accent in accents {
        let (h, _, s) = accent.to_hls();
        let saturation = (s * SWEEP_SATURATION_BOOST).min(1.0);
        for level in LIGHTNESS_SWEEP {
            let target = if bg_luminance < DARK_BACKGROUND {
                level.max(SWEEP_FLOOR_ON_DARK)
            } else if bg_luminance < LIGHT_BACKGROUND {
                level
            } else {
                level.min(SWEEP_CEILING_ON_LIGHT)
            };
            let color = Color::from_hls(h, target, saturation);
            let contrast = Color::contrast_ratio(&background, &color);
            if contrast >= min_contrast {
                candidates.push(Candidate {
                    color,
                    contrast,
                    distance: (target - 1.0).abs() + (target - 0.0).abs(),
                });
            }
        }
    }

    if candidates.is_empty() {
        return ensure_text_contrast(background, min_contrast);
    }

    if prefer_color {
        candidates.sort_by(|a, b| {
            b.distance
                .total_cmp(&a.distance)
                .then(b.contrast.total_cmp(&a.contrast))
        });
        candidates
            .iter()
            .take(3)
            .find(|c| c.distance > 1.0)
            .unwrap_or(&candidates[0])
            .color
    } else {
        candidates.sort_by(|a, b| {
            b.contrast
                .total_cmp(&a.contrast)
                .then(b.distance.total_cmp(&a.distance))
        });
        candidates[0].color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    const DARK_BG: Color = Color::new(20, 16, 24);
    const LIGHT_BG: Color = Color::new(236, 232, 220);

    fn accents() -> Vec<Color> {
        vec![
            Color::new(200, 80, 60),
            Color::new(60, 140, 200),
            Color::new(120, 180, 90),
        ]
    }

    #[test]
    fn meets_floor_on_dark_background() {
        for floor in [1.8, 2.5, 3.0, 3.5, 4.0, 4.5, 7.0] {
            let text = create_readable_text_color(DARK_BG, &accents(), floor, true);
            let ratio = Color::contrast_ratio(&DARK_BG, &text);
            assert!(ratio >= floor, "floor {floor}: {text} only reaches {ratio:.2}");
        }
    }

    #[test]
    fn meets_floor_on_light_background() {
        for floor in [1.8, 3.0, 4.0, 4.5] {
            let text = create_readable_text_color(LIGHT_BG, &accents(), floor, false);
            let ratio = Color::contrast_ratio(&LIGHT_BG, &text);
            assert!(ratio >= floor, "floor {floor}: {text} only reaches {ratio:.2}");
        }
    }

    #[test]
    fn prefers_inverted_accent_at_low_floor() {
        let accent = Color::new(200, 80, 60);
        let text = create_readable_text_color(DARK_BG, &[accent], 3.0, true);

        let (h, _, s) = accent.to_hls();
        let expected = Color::from_hls(h, 0.8, (s * 2.0).min(1.0));
        assert_eq!(text, expected);
    }

    #[test]
    fn no_inversion_above_three() {
        let accent = Color::new(200, 80, 60);
        let text = create_readable_text_color(DARK_BG, &[accent], 3.5, true);

        let (h, _, s) = accent.to_hls();
        let inverted = Color::from_hls(h, 0.8, (s * 2.0).min(1.0));
        assert_ne!(text, inverted);
        assert!(Color::contrast_ratio(&DARK_BG, &text) >= 3.5);
    }

    #[test]
    fn without_color_preference_highest_contrast_wins() {
        let accent = Color::new(60, 140, 200);
        let text = create_readable_text_color(DARK_BG, &[accent], 3.0, false);

        let (h, _, s) = accent.to_hls();
        let brightest = Color::from_hls(h, 0.95, (s * 1.6).min(1.0));
        assert_eq!(text, brightest);
    }

    #[test]
    fn empty_accents_fall_back_to_white_or_black() {
        assert_eq!(create_readable_text_color(DARK_BG, &[], 4.5, true), WHITE);
        assert_eq!(create_readable_text_color(LIGHT_BG, &[], 4.5, true), BLACK);
    }

    #[test]
    fn impossible_floor_picks_stronger_of_white_and_black() {
        let mid = Color::new(118, 118, 118);
        let text = create_readable_text_color(mid, &accents(), 20.0, true);
        let white = Color::contrast_ratio(&mid, &WHITE);
        let black = Color::contrast_ratio(&mid, &BLACK);
        assert_eq!(text, if white >= black { WHITE } else { BLACK });
    }

    #[test]
    fn requirement_resolves_like_function() {
        let accents = accents();
        let req = ContrastRequirement::new(DARK_BG, &accents, 2.5).prefer_color(false);
        assert_eq!(
            req.resolve(),
            create_readable_text_color(DARK_BG, &accents, 2.5, false)
        );
    }

    #[test]
    fn deterministic_for_same_input() {
        let a = create_readable_text_color(Color::new(90, 60, 40), &accents(), 3.0, true);
        let b = create_readable_text_color(Color::new(90, 60, 40), &accents(), 3.0, true);
        assert_eq!(a, b);
    }
}
