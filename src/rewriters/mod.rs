pub mod dunst;
pub mod hyprland;
pub mod i3;
pub mod i3blocks;
pub mod kitty;
pub mod mako;
pub mod marker;
pub mod nvim;
pub mod waybar;

use std::path::Path;

use crate::error::ThemeError;
use crate::theme::Palette;

/// Common interface for every config format this tool knows how to recolor.
pub trait ConfigRewriter {
    /// Short tag used in diagnostics.
    fn name(&self) -> &'static str;

    /// Rewrite the config at `path` for `palette`.
    ///
    /// Returns a one-line summary of the colors written.
    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError>;

    /// Whether a missing file is created rather than skipped.
    fn creates_missing(&self) -> bool {
        false
    }
}

/// Closed set of supported rewrite strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    I3,
    Hyprland,
    Kitty,
    Dunst,
    Mako,
    I3blocks,
    WaybarConfig,
    WaybarStyle,
    Nvim,
}

impl Strategy {
    pub fn rewriter(self) -> &'static dyn ConfigRewriter {
        match self {
            Strategy::I3 => &i3::I3Rewriter,
            Strategy::Hyprland => &hyprland::HyprlandRewriter,
            Strategy::Kitty => &kitty::KittyRewriter,
            Strategy::Dunst => &dunst::DunstRewriter,
            Strategy::Mako => &mako::MakoRewriter,
            Strategy::I3blocks => &i3blocks::I3blocksRewriter,
            Strategy::WaybarConfig => &waybar::WaybarConfigRewriter,
            Strategy::WaybarStyle => &waybar::WaybarStyleRewriter,
            Strategy::Nvim => &nvim::NvimRewriter,
        }
    }

    pub fn name(self) -> &'static str {
        self.rewriter().name()
    }

    pub fn apply(self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        self.rewriter().apply(path, palette)
    }

    pub fn creates_missing(self) -> bool {
        self.rewriter().creates_missing()
    }
}

pub(crate) fn read_config(path: &Path) -> Result<String, ThemeError> {
    std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_config(path: &Path, content: &str) -> Result<(), ThemeError> {
    std::fs::write(path, content).map_err(|source| ThemeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
