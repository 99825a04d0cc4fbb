use std::path::Path;

use tracing::debug;

use crate::error::ThemeError;
use crate::pipeline::accents::Accents;
use crate::theme::Palette;

use super::marker::{replace_all, Marker};
use super::{read_config, write_config, ConfigRewriter};

const ACTIVE_ALPHA: u8 = 0xee;
const INACTIVE_ALPHA: u8 = 0xaa;

/// Hyprland compositor: active and inactive window border colors.
pub struct HyprlandRewriter;

impl ConfigRewriter for HyprlandRewriter {
    fn name(&self) -> &'static str {
        "hyprland"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let accents = Accents::from_palette(palette);
        let active = accents.primary.to_rgba_hex(ACTIVE_ALPHA);
        let inactive = accents.secondary.to_rgba_hex(INACTIVE_ALPHA);

        let edits = [
            (
                Marker::new(
                    r"col\.active_border\s*=\s*rgba\([0-9a-fA-F]{8}\)\s*rgba\([0-9a-fA-F]{8}\)\s*\d+deg",
                )?,
                format!("col.active_border = {active} {active} 45deg"),
            ),
            (
                Marker::new(r"col\.inactive_border\s*=\s*rgba\([0-9a-fA-F]{8}\)")?,
                format!("col.inactive_border = {inactive}"),
            ),
        ];
        let out = replace_all(&config, &edits);
        debug!("hyprland: rewrote {} border declarations", out.count);

        write_config(path, &out.text)?;
        Ok(format!("primary {}", accents.primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriters::test_support::sample_palette;

    const CONFIG: &str = "\
general {
    gaps_in = 5
    border_size = 2
    col.active_border = rgba(33ccffee) rgba(00ff99ee) 45deg
    col.inactive_border = rgba(595959aa)
    layout = dwindle
}
";

    fn apply_to(content: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hyprland.conf");
        std::fs::write(&path, content).unwrap();
        HyprlandRewriter.apply(&path, &sample_palette()).unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn borders_use_alpha_hex() {
        let out = apply_to(CONFIG);
        let accents = Accents::from_palette(&sample_palette());
        let p = accents.primary.to_hex()[1..].to_string();
        let s = accents.secondary.to_hex()[1..].to_string();

        assert!(out.contains(&format!(
            "col.active_border = rgba({p}ee) rgba({p}ee) 45deg"
        )));
        assert!(out.contains(&format!("col.inactive_border = rgba({s}aa)")));
    }

    #[test]
    fn other_settings_survive() {
        let out = apply_to(CONFIG);
        assert!(out.starts_with("general {\n    gaps_in = 5\n    border_size = 2\n"));
        assert!(out.ends_with("    layout = dwindle\n}\n"));
    }

    #[test]
    fn reapplication_is_stable() {
        let once = apply_to(CONFIG);
        assert_eq!(apply_to(&once), once);
    }

    #[test]
    fn single_color_gradient_is_left_alone() {
        let config = "col.active_border = rgba(33ccffee)\n";
        assert_eq!(apply_to(config), config);
    }
}
