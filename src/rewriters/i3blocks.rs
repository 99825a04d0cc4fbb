use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;
use crate::theme::Palette;

use super::{read_config, write_config, ConfigRewriter};

pub const GRADIENT_STEPS: usize = 12;
const HUE_STEP: f64 = 30.0;
const LIGHTNESS_START: f64 = 0.4;
const LIGHTNESS_SPAN: f64 = 0.4;
const SATURATION_BOOST: f64 = 1.4;
const SATURATION_CAP: f64 = 0.9;

/// Blocks that receive a gradient color, in gradient order.
pub const BLOCKS: [&str; 10] = [
    "wifi_info",
    "cpu_info",
    "gpu_info",
    "memory_usage",
    "disk_usage",
    "volume",
    "brightness",
    "date",
    "time",
    "battery",
];

/// One step of the status-bar gradient, before quantization to RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
    pub color: Color,
}

/// Twelve stops rotating the base hue by 30° per step while lightness
/// climbs linearly from 0.4 to 0.8.
pub fn gradient(base: Color) -> Vec<GradientStop> {
    let (base_hue, _, base_saturation) = base.to_hls();
    let saturation = (base_saturation * SATURATION_BOOST).min(SATURATION_CAP);
    (0..GRADIENT_STEPS)
        .map(|i| {
            let hue = (base_hue + HUE_STEP * i as f64).rem_euclid(360.0);
            let lightness =
                LIGHTNESS_START + LIGHTNESS_SPAN * (i as f64 / (GRADIENT_STEPS - 1) as f64);
            GradientStop {
                hue,
                lightness,
                saturation,
                color: Color::from_hls(hue, lightness, saturation),
            }
        })
        .collect()
}

/// i3blocks: gives each known block its own gradient color.
pub struct I3blocksRewriter;

impl ConfigRewriter for I3blocksRewriter {
    fn name(&self) -> &'static str {
        "i3blocks"
    }

    fn apply(&self, path: &Path, palette: &Palette) -> Result<String, ThemeError> {
        let config = read_config(path)?;
        let stops = gradient(palette.primary());

        let mut current_block: Option<&str> = None;
        let mut recolored = 0;
        let lines: Vec<String> = config
            .split('\n')
            .map(|line| {
                if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                    current_block = Some(name);
                } else if line.starts_with("color=#") {
                    let stop = current_block
                        .and_then(|name| BLOCKS.iter().position(|b| *b == name))
                        .and_then(|index| stops.get(index));
                    if let Some(stop) = stop {
                        recolored += 1;
                        return format!("color={}", stop.color);
                    }
                }
                line.to_string()
            })
            .collect();
        debug!("i3blocks: recolored {recolored} blocks");

        write_config(path, &lines.join("\n"))?;
        Ok(format!(
            "gradient from {}",
            palette.primary().ensure_minimum_brightness(0.3)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriters::test_support::sample_palette;

    const CONFIG: &str = "\
command=~/.config/i3blocks/scripts/$BLOCK_NAME
separator_block_width=15

[cpu_info]
interval=5
color=#ffffff

[custom]
color=#123456

[battery]
label=BAT
color=#00ff00
";

    #[test]
    fn hue_advances_thirty_degrees() {
        let stops = gradient(Color::new(52, 84, 120));
        assert_eq!(stops.len(), GRADIENT_STEPS);
        for pair in stops.windows(2) {
            let step = (pair[1].hue - pair[0].hue).rem_euclid(360.0);
            assert!((step - 30.0).abs() < 1e-9, "hue step was {step}");
        }
    }

    #[test]
    fn lightness_is_non_decreasing() {
        let stops = gradient(Color::new(200, 60, 60));
        for pair in stops.windows(2) {
            assert!(pair[1].lightness >= pair[0].lightness);
        }
        assert!((stops[0].lightness - 0.4).abs() < 1e-12);
        assert!((stops[11].lightness - 0.8).abs() < 1e-12);
    }

    #[test]
    fn saturation_is_capped() {
        let stops = gradient(Color::new(255, 0, 0));
        assert!(stops.iter().all(|s| (s.saturation - 0.9).abs() < 1e-12));
    }

    #[test]
    fn known_blocks_get_positional_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("i3blocks.conf");
        std::fs::write(&path, CONFIG).unwrap();

        let palette = sample_palette();
        I3blocksRewriter.apply(&path, &palette).unwrap();
        let out = std::fs::read_to_string(&path).unwrap();
        let stops = gradient(palette.primary());

        assert!(out.contains(&format!("[cpu_info]\ninterval=5\ncolor={}\n", stops[1].color)));
        assert!(out.contains(&format!("label=BAT\ncolor={}\n", stops[9].color)));
        assert!(out.contains("[custom]\ncolor=#123456\n"));
        assert!(out.starts_with("command=~/.config/i3blocks/scripts/$BLOCK_NAME\n"));
        assert!(out.ends_with('\n'));
    }
}
