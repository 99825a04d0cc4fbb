use std::path::Path;

use tracing::{debug, info};

use crate::error::ThemeError;
use crate::theme::Palette;

use super::dunst::NotificationColors;
use super::marker::{replace_all, Marker, HEX};
use super::{read_config, write_config, ConfigRewriter};

const BORDER_SIZE: u32 = 2;
const BORDER_RADIUS: u32 = 5;
const DEFAULT_TIMEOUT_MS: u32 = 5000;
const FONT: &str = "Victor Mono 11";

/// mako: recolors an existing config, or writes a fresh one when absent.
pub struct MakoRewriter;

impl ConfigRewriter for MakoRewriter {
    fn name(&self) -> &'static str {
        "mako"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let colors = NotificationColors::from_palette(palette);

        let content = if path.exists() {
            let config = read_config(path)?;
            let edits = [
                (
                    Marker::line_key("background-color", "=", HEX)?,
                    format!("background-color={}", colors.background),
                ),
                (
                    Marker::line_key("text-color", "=", HEX)?,
                    format!("text-color={}", colors.foreground),
                ),
                (
                    Marker::line_key("border-color", "=", HEX)?,
                    format!("border-color={}", colors.border),
                ),
            ];
            let out = replace_all(&config, &edits);
            debug!("mako: rewrote {} color keys", out.count);
            out.text
        } else {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|source| ThemeError::Write {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
            info!("creating mako config at {}", path.display());
            default_config(&colors)
        };

        write_config(path, &content)?;
        Ok(format!(
            "bg={}, fg={}, border={}",
            colors.background, colors.foreground, colors.border
        ))
    }

    fn creates_missing(&self) -> bool {
        true
    }
}

fn default_config(colors: &NotificationColors) -> String {
    format!(
        "# Mako notification daemon config
background-color={}
text-color={}
border-color={}
border-size={BORDER_SIZE}
border-radius={BORDER_RADIUS}
default-timeout={DEFAULT_TIMEOUT_MS}
font={FONT}
",
        colors.background, colors.foreground, colors.border
    )
}
