use std::ffi::OsString;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::color::Color;
use crate::error::ThemeError;
use crate::theme::Palette;

pub const DEFAULT_PROGRAM: &str = "polychromatic-cli";
const DEVICE: &str = "laptop";
const MAIN_ZONE: &str = "main";
const LOGO_ZONE: &str = "logo";

/// Lighting effect requested from the device-control program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Static,
    Wave,
}

impl Effect {
    fn option(self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Static => "static",
            Effect::Wave => "wave",
        }
    }
}

/// Keyboard backlight driven through an external control program.
///
/// Has no backup or rollback; a failed command only affects this step.
#[derive(Debug, Clone)]
pub struct KeyboardBacklight {
    program: OsString,
}

impl Default for KeyboardBacklight {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl KeyboardBacklight {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Light the main zone with the deepened primary and the logo with the
    /// secondary. Falls back to a wave effect when static is refused.
    pub fn apply(&self, palette: &Palette) -> Result<String, ThemeError> {
        let (primary, secondary) = keyboard_colors(palette);

        // Clear whatever effect is running; failure here is irrelevant.
        self.run(MAIN_ZONE, Effect::None, None);

        let mode = if self.run(MAIN_ZONE, Effect::Static, Some(primary)) {
            Effect::Static
        } else if self.run(MAIN_ZONE, Effect::Wave, Some(primary)) {
            Effect::Wave
        } else {
            return Err(ThemeError::DeviceControl(format!(
                "{} refused both static and wave effects",
                self.program.to_string_lossy()
            )));
        };

        if !self.run(LOGO_ZONE, Effect::Static, Some(secondary)) {
            debug!("keyboard: logo zone did not accept {secondary}");
        }

        Ok(format!(
            "{} mode with {primary}, logo={secondary}",
            mode.option()
        ))
    }

    /// Run one device command; true when it exits successfully.
    fn run(&self, zone: &str, effect: Effect, color: Option<Color>) -> bool {
        let mut cmd = Command::new(&self.program);
        cmd.args(["--device", DEVICE, "--zone", zone, "--option", effect.option()]);
        if effect == Effect::Wave {
            cmd.args(["--parameter", "1"]);
        }
        if let Some(color) = color {
            cmd.arg("--colours").arg(color.to_hex());
        }
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

        match cmd.status() {
            Ok(status) => status.success(),
            Err(e) => {
                warn!(
                    "keyboard: failed to run {}: {e}",
                    self.program.to_string_lossy()
                );
                false
            }
        }
    }
}

/// Saturated primary and dimmed secondary for the backlight.
pub fn keyboard_colors(palette: &Palette) -> (Color, Color) {
    let (h, l, s) = palette.primary().to_hls();
    let primary = Color::from_hls(h, (l * 0.8).max(0.25), (s * 1.8).min(1.0));
    let secondary = palette
        .secondary_or(0.7)
        .adjust_brightness(0.6)
        .ensure_minimum_brightness(0.25);
    (primary, secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriters::test_support::sample_palette;

    #[test]
    fn succeeding_program_uses_static() {
        let summary = KeyboardBacklight::new("true")
            .apply(&sample_palette())
            .unwrap();
        assert!(summary.starts_with("static mode"), "{summary}");
    }

    #[test]
    fn failing_program_is_device_error() {
        let err = KeyboardBacklight::new("false")
            .apply(&sample_palette())
            .unwrap_err();
        assert!(matches!(err, ThemeError::DeviceControl(_)));
    }

    #[test]
    fn missing_program_is_device_error() {
        let err = KeyboardBacklight::new("/nonexistent/polychromatic-cli")
            .apply(&sample_palette())
            .unwrap_err();
        assert!(matches!(err, ThemeError::DeviceControl(_)));
    }

    #[cfg(unix)]
    #[test]
    fn static_refusal_falls_back_to_wave() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("calls.log");
        let script = dir.path().join("fake-cli");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$*\" >> '{}'\ncase \"$*\" in\n  *\"--zone main --option static\"*) exit 1 ;;\nesac\nexit 0\n",
                log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let summary = KeyboardBacklight::new(script.as_os_str())
            .apply(&sample_palette())
            .unwrap();
        assert!(summary.starts_with("wave mode"), "{summary}");

        let calls = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = calls.lines().collect();
        assert_eq!(lines.len(), 4, "{calls}");
        assert!(lines[0].contains("--zone main --option none"));
        assert!(lines[2].contains("--option wave --parameter 1 --colours #"));
        assert!(lines[3].contains("--zone logo --option static --colours #"));
    }

    #[test]
    fn primary_is_deepened() {
        let palette = Palette::new(vec![Color::new(120, 100, 90), Color::new(60, 80, 100)]);
        let (primary, _) = keyboard_colors(&palette);
        let (_, _, s_before) = palette.primary().to_hls();
        let (_, _, s_after) = primary.to_hls();
        assert!(s_after > s_before);
    }
}
