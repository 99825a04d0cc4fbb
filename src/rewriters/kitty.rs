use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;
use crate::pipeline::readable::create_readable_text_color;
use crate::theme::Palette;

use super::marker::{replace_all, Marker, HEX};
use super::{read_config, write_config, ConfigRewriter};

/// Colors written into a kitty config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KittyColors {
    pub background: Color,
    pub foreground: Color,
    pub selection_background: Color,
    pub selection_foreground: Color,
    pub cursor: Color,
}

impl KittyColors {
    pub fn from_palette(palette: &Palette) -> Self {
        let primary = palette.primary();
        let background = primary.adjust_brightness(0.08).ensure_minimum_brightness(0.05);
        let foreground = create_readable_text_color(background, palette.slice(1, 3), 3.0, true);
        let selection_background = primary.adjust_brightness(0.3).ensure_minimum_brightness(0.2);
        let selection_foreground =
            create_readable_text_color(selection_background, palette.colors(), 3.0, true);
        let cursor = primary.adjust_brightness(0.7).ensure_minimum_brightness(0.4);
        Self {
            background,
            foreground,
            selection_background,
            selection_foreground,
            cursor,
        }
    }
}

/// kitty terminal: background, foreground, selection and cursor.
pub struct KittyRewriter;

impl ConfigRewriter for KittyRewriter {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let colors = KittyColors::from_palette(palette);

        let key = |name: &str, value: Color| -> Result<(Marker, String), ThemeError> {
            Ok((Marker::line_key(name, "", HEX)?, format!("{name} {value}")))
        };
        let edits = [
            key("foreground", colors.foreground)?,
            key("background", colors.background)?,
            key("selection_background", colors.selection_background)?,
            key("selection_foreground", colors.selection_foreground)?,
            key("cursor", colors.cursor)?,
        ];
        let out = replace_all(&config, &edits);
        debug!("kitty: rewrote {} keys", out.count);

        write_config(path, &out.text)?;
        Ok(format!(
            "contrast {:.1}:1",
            Color::contrast_ratio(&colors.background, &colors.foreground)
        ))
    }
}
