use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;
use crate::pipeline::accents::Accents;
use crate::pipeline::readable::ContrastRequirement;
use crate::theme::Palette;

use super::marker::{replace_all, Marker, HEX};
use super::{read_config, write_config, ConfigRewriter};

const WINDOW_HEADER: &str =
    "# class                 border  backgr. text    indicator child_border";

const URGENT: &str = "#ff4444";
const URGENT_TEXT: &str = "#ffffff";
const BAR_URGENT: &str = "#f38ba8";
const BAR_BINDING_MODE: &str = "#f9e2af";
const BAR_BADGE_TEXT: &str = "#000000";

/// i3 window manager: the `client.*` border table and the bar `colors` block.
pub struct I3Rewriter;

impl ConfigRewriter for I3Rewriter {
    fn name(&self) -> &'static str {
        "i3"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let accents = Accents::from_palette(palette);

        let edits = [
            (window_marker()?, window_colors(&accents, palette)),
            (bar_marker()?, bar_colors(&accents, palette)),
        ];
        let out = replace_all(&config, &edits);
        debug!("i3: rewrote {} color blocks in {}", out.count, path.display());

        write_config(path, &out.text)?;
        Ok(format!("primary {}", accents.primary))
    }
}

/// From the table header through the five colors of `client.placeholder`.
fn window_marker() -> Result<Marker, ThemeError> {
    Marker::new(&format!(
        r"(?s)# class\s+border\s+backgr\.\s+text\s+indicator\s+child_border.*?client\.placeholder.*?{HEX}(?:\s+{HEX}\s+{HEX}\s+{HEX}\s+{HEX})*"
    ))
}

fn bar_marker() -> Result<Marker, ThemeError> {
    Marker::new(r"(?m)^[ \t]*colors\s*\{[^}]*\}")
}

fn text_on(bg: Color, palette: &Palette, min_contrast: f64) -> Color {
    ContrastRequirement::new(bg, palette.colors(), min_contrast).resolve()
}

fn window_colors(a: &Accents, palette: &Palette) -> String {
    let row = |class: &str, c: Color, text: String| {
        format!("{class:<23} {c} {c} {text} {c}   {c}")
    };
    [
        WINDOW_HEADER.to_string(),
        row("client.focused", a.primary, text_on(a.primary, palette, 3.5).to_hex()),
        row(
            "client.focused_inactive",
            a.secondary,
            text_on(a.secondary, palette, 2.5).to_hex(),
        ),
        row("client.unfocused", a.tertiary, text_on(a.tertiary, palette, 2.0).to_hex()),
        format!("{:<23} {URGENT} {URGENT} {URGENT_TEXT} {URGENT}   {URGENT}", "client.urgent"),
        row(
            "client.placeholder",
            a.quaternary,
            text_on(a.quaternary, palette, 1.8).to_hex(),
        ),
    ]
    .join("\n")
}

fn bar_colors(a: &Accents, palette: &Palette) -> String {
    let background = a.primary.adjust_brightness(0.15).ensure_minimum_brightness(0.1);
    let statusline = text_on(background, palette, 3.0);
    let separator = a.primary.adjust_brightness(0.3);
    let workspace = |c: Color, min_contrast: f64| {
        format!("{c} {c} {}", text_on(c, palette, min_contrast))
    };

    format!(
        "    colors {{
        background {background}
        statusline {statusline}
        separator {separator}
        focused_workspace  {}
        active_workspace   {}
        inactive_workspace {}
        urgent_workspace   {BAR_URGENT} {BAR_URGENT} {BAR_BADGE_TEXT}
        binding_mode       {BAR_BINDING_MODE} {BAR_BINDING_MODE} {BAR_BADGE_TEXT}
    }}",
        workspace(a.primary, 3.0),
        workspace(a.secondary, 3.0),
        workspace(a.tertiary, 2.5),
    )
}
