use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;
use crate::pipeline::readable::ContrastRequirement;
use crate::theme::Palette;

use super::marker::{Marker, HEX};
use super::{read_config, write_config, ConfigRewriter};

/// First line of the highlight block this rewriter owns.
pub const BLOCK_HEADER: &str = "\" Custom color scheme to match kitty Deep Space theme";

const ERROR_FG: &str = "#ff6b6b";
const ERROR_BG: &str = "#2a0a0a";
const WARNING_FG: &str = "#ffa500";
const WARNING_BG: &str = "#2a1a00";

/// Neovim: regenerates the highlight block between its header comment and
/// its closing `highlight Warning` line.
///
/// A file that never received the block has no anchor; it is left as is.
pub struct NvimRewriter;

impl ConfigRewriter for NvimRewriter {
    fn name(&self) -> &'static str {
        "nvim"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let theme = EditorTheme::from_palette(palette);

        let marker = Marker::block(
            BLOCK_HEADER,
            &format!("highlight Warning guifg={HEX} guibg={HEX}"),
        )?;
        let out = marker.replace(&config, &theme.render());
        if out.count == 0 {
            debug!("nvim: no highlight block in {}", path.display());
        }

        write_config(path, &out.text)?;
        Ok(format!(
            "bg={}, fg={}, accent={}",
            theme.background, theme.foreground, theme.primary
        ))
    }
}

/// Every color the highlight block refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorTheme {
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub background: Color,
    pub foreground: Color,
    pub cursor_line: Color,
    pub line_nr: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub search_fg: Color,
    pub inc_search_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub status_nc_bg: Color,
    pub status_nc_fg: Color,
    pub comment: Color,
    pub keyword: Color,
    pub type_name: Color,
}

impl EditorTheme {
    pub fn from_palette(palette: &Palette) -> Self {
        let colors = palette.colors();
        let primary = palette.primary();
        let secondary = palette.secondary_or(0.8);
        let tertiary = palette.tertiary_or(0.6);

        let background = primary.adjust_brightness(0.08).ensure_minimum_brightness(0.05);
        let selection_bg = primary.adjust_brightness(0.3).ensure_minimum_brightness(0.2);
        let status_bg = primary.adjust_brightness(0.2);
        let text = |bg: Color, min: f64| ContrastRequirement::new(bg, colors, min);

        Self {
            primary,
            secondary,
            tertiary,
            background,
            foreground: text(background, 3.0).resolve(),
            cursor_line: background.adjust_brightness(1.5),
            line_nr: primary.adjust_brightness(0.4),
            selection_bg,
            selection_fg: text(selection_bg, 3.0).resolve(),
            search_fg: text(primary, 4.0).prefer_color(false).resolve(),
            inc_search_fg: text(secondary, 4.0).prefer_color(false).resolve(),
            status_bg,
            status_fg: text(status_bg, 3.0).resolve(),
            status_nc_bg: background.adjust_brightness(1.2),
            status_nc_fg: primary.adjust_brightness(0.4),
            comment: primary.adjust_brightness(0.5),
            keyword: secondary.adjust_brightness(1.2),
            type_name: tertiary.adjust_brightness(1.1),
        }
    }

    /// The highlight block, header to `Warning` line, without a trailing newline.
    pub fn render(&self) -> String {
        let t = self;
        [
            BLOCK_HEADER.to_string(),
            format!("highlight Normal guifg={} guibg={}", t.foreground, t.background),
            format!("highlight CursorLine guibg={}", t.cursor_line),
            format!("highlight LineNr guifg={} guibg={}", t.line_nr, t.background),
            format!(
                "highlight CursorLineNr guifg={} guibg={} gui=bold",
                t.primary, t.cursor_line
            ),
            format!("highlight Visual guifg={} guibg={}", t.selection_fg, t.selection_bg),
            format!("highlight Search guifg={} guibg={}", t.search_fg, t.primary),
            format!("highlight IncSearch guifg={} guibg={}", t.inc_search_fg, t.secondary),
            format!("highlight StatusLine guifg={} guibg={}", t.status_fg, t.status_bg),
            format!(
                "highlight StatusLineNC guifg={} guibg={}",
                t.status_nc_fg, t.status_nc_bg
            ),
            format!("highlight VertSplit guifg={} guibg={}", t.selection_bg, t.background),
            format!("highlight Pmenu guifg={} guibg={}", t.status_fg, t.status_bg),
            format!("highlight PmenuSel guifg={} guibg={}", t.selection_fg, t.selection_bg),
            format!("highlight Comment guifg={} gui=italic", t.comment),
            format!("highlight String guifg={}", t.tertiary),
            format!("highlight Number guifg={}", t.primary),
            format!("highlight Function guifg={}", t.secondary),
            format!("highlight Keyword guifg={} gui=bold", t.keyword),
            format!("highlight Type guifg={}", t.type_name),
            format!("highlight Special guifg={}", t.primary),
            format!("highlight Error guifg={ERROR_FG} guibg={ERROR_BG}"),
            format!("highlight Warning guifg={WARNING_FG} guibg={WARNING_BG}"),
        ]
        .join("\n")
    }
}
