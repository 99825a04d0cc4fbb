use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;
use crate::pipeline::readable::create_readable_text_color;
use crate::theme::Palette;

use super::marker::{replace_all, Marker, HEX};
use super::{read_config, write_config, ConfigRewriter};

/// Background, text and border colors shared by the notification daemons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationColors {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
}

impl NotificationColors {
    pub fn from_palette(palette: &Palette) -> Self {
        let secondary = palette.secondary_or(0.8);
        let background = palette
            .primary()
            .adjust_brightness(0.15)
            .ensure_minimum_brightness(0.1);
        let foreground = create_readable_text_color(background, palette.colors(), 3.5, true);
        let border = secondary.adjust_brightness(0.6).ensure_minimum_brightness(0.3);
        Self {
            background,
            foreground,
            border,
        }
    }
}

/// dunst: quoted `key = "#hex"` colors, rewritten in every urgency section.
pub struct DunstRewriter;

impl ConfigRewriter for DunstRewriter {
    fn name(&self) -> &'static str {
        "dunst"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let colors = NotificationColors::from_palette(palette);

        let quoted = format!("\"{HEX}\"");
        let edits = [
            (
                Marker::line_key("background", "=", &quoted)?,
                format!("background = \"{}\"", colors.background),
            ),
            (
                Marker::line_key("foreground", "=", &quoted)?,
                format!("foreground = \"{}\"", colors.foreground),
            ),
            (
                Marker::line_key("frame_color", "=", &quoted)?,
                format!("frame_color = \"{}\"", colors.border),
            ),
        ];
        let out = replace_all(&config, &edits);
        debug!("dunst: rewrote {} color keys", out.count);

        write_config(path, &out.text)?;
        Ok(format!(
            "bg={}, fg={}, frame={}",
            colors.background, colors.foreground, colors.border
        ))
    }
}
