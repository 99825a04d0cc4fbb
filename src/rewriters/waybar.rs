use std::path::Path;

use tracing::{debug, info};

use crate::color::Color;
use crate::error::ThemeError;
use crate::pipeline::readable::create_readable_text_color;
use crate::theme::Palette;

use super::marker::{replace_all, Marker};
use super::{read_config, write_config, ConfigRewriter};

/// Waybar JSON config. Colors live in the stylesheet, so this only checks
/// that the file parses.
pub struct WaybarConfigRewriter;

impl ConfigRewriter for WaybarConfigRewriter {
    fn name(&self) -> &'static str {
        "waybar"
    }

    fn apply(&self, path: &Path, _palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        serde_json::from_str::<serde_json::Value>(&config).map_err(|e| ThemeError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("waybar config parsed; colors are handled by the stylesheet");
        Ok("no color updates needed".to_string())
    }
}

/// Colors written into the Waybar stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleColors {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub background: Color,
    pub text: Color,
}

impl StyleColors {
    pub fn from_palette(palette: &Palette) -> Self {
        let primary = palette.primary().ensure_minimum_brightness(0.3);
        let background = primary.adjust_brightness(0.1).ensure_minimum_brightness(0.05);
        Self {
            primary,
            secondary: primary.adjust_brightness(0.7),
            tertiary: primary.adjust_brightness(0.4),
            background,
            text: create_readable_text_color(background, palette.colors(), 3.0, true),
        }
    }
}

/// Waybar CSS: custom properties plus plain background/color declarations.
pub struct WaybarStyleRewriter;

impl ConfigRewriter for WaybarStyleRewriter {
    fn name(&self) -> &'static str {
        "waybar_style"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let css = read_config(path)?;
        let c = StyleColors::from_palette(palette);

        let decl = |key: &str, value: Color| -> Result<(Marker, String), ThemeError> {
            Ok((Marker::css_declaration(key)?, format!("{key}: {value};")))
        };
        let edits = [
            decl("--primary", c.primary)?,
            decl("--secondary", c.secondary)?,
            decl("--background", c.background)?,
            decl("--text", c.text)?,
            decl("background-color", c.background)?,
            decl("background", c.background)?,
            decl("color", c.text)?,
        ];
        let out = replace_all(&css, &edits);
        debug!("waybar_style: rewrote {} declarations", out.count);

        write_config(path, &out.text)?;
        Ok(format!("primary {}", c.primary))
    }
}
