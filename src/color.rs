use anyhow::{bail, Result};
use palette::{encoding, FromColor, Hsl, IntoColor, Lab, Srgb};

/// HLS in `f64`, hue in degrees.
type Hls = Hsl<encoding::Srgb, f64>;

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components and provides conversions to HLS and CIELAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
};
pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid hex color: expected 6 hex digits, got {hex:?}");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Hex with an alpha byte appended, wrapped as `rgba(rrggbbaa)`.
    pub fn to_rgba_hex(self, alpha: u8) -> String {
        format!(
            "rgba({:02x}{:02x}{:02x}{:02x})",
            self.r, self.g, self.b, alpha
        )
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to CIELAB (for K-means clustering).
    pub fn to_lab(self) -> Lab {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Create from CIELAB, clamping out-of-gamut channels.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb: Srgb<f32> = Srgb::from_color(lab);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
    }

    /// Hue (degrees, `[0, 360)`), lightness and saturation.
    pub fn to_hls(self) -> (f64, f64, f64) {
        let srgb: Srgb<f64> = self.to_srgb_u8().into_format();
        let hls: Hls = Hls::from_color(srgb);
        (
            hls.hue.into_positive_degrees(),
            hls.lightness,
            hls.saturation,
        )
    }

    /// Build a color from hue (degrees), lightness and saturation.
    ///
    /// Channels are truncated rather than rounded, so repeated adjustments
    /// drift downward by at most one step per channel.
    pub fn from_hls(hue: f64, lightness: f64, saturation: f64) -> Self {
        let hls = Hls::new(hue, saturation, lightness);
        let srgb: Srgb<f64> = Srgb::from_color(hls);
        let channel = |c: f64| (c * 255.0) as u8;
        Self::new(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
    }

    /// WCAG 2.0 relative luminance.
    ///
    /// Linearizes each sRGB channel, then computes the weighted sum.
    pub fn relative_luminance(self) -> f64 {
        fn linearize(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG 2.0 contrast ratio between two colors.
    ///
    /// Returns a value in [1, 21]. Higher means more contrast.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f64 {
        let l1 = c1.relative_luminance();
        let l2 = c2.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Scale HLS lightness by `factor`, clamped to [0, 1].
    pub fn adjust_brightness(self, factor: f64) -> Color {
        let (h, l, s) = self.to_hls();
        Color::from_hls(h, (l * factor).clamp(0.0, 1.0), s)
    }

    /// Raise HLS lightness to `floor` if it is below it. Never darkens.
    pub fn ensure_minimum_brightness(self, floor: f64) -> Color {
        let (h, l, s) = self.to_hls();
        if l < floor {
            Color::from_hls(h, floor, s)
        } else {
            self
        }
    }

    /// Channel spread weighted by mean brightness.
    pub fn vibrancy(self) -> f64 {
        let max = self.r.max(self.g).max(self.b) as f64;
        let min = self.r.min(self.g).min(self.b) as f64;
        let mean = (self.r as f64 + self.g as f64 + self.b as f64) / 3.0;
        (max - min) * (mean / 255.0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Pick plain white or black for text on `bg`.
///
/// White wins when it meets `min_contrast`, then black; if neither does,
/// the higher-contrast one (white on a tie).
pub fn ensure_text_contrast(bg: Color, min_contrast: f64) -> Color {
    let white = Color::contrast_ratio(&bg, &WHITE);
    let black = Color::contrast_ratio(&bg, &BLACK);
    if white >= min_contrast {
        WHITE
    } else if black >= min_contrast {
        BLACK
    } else if white >= black {
        WHITE
    } else {
        BLACK
    }
}
