use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::device::KeyboardBacklight;
use crate::error::ThemeError;
use crate::pipeline::extract::extract_dominant_colors;
use crate::rewriters::Strategy;
use crate::theme::{Palette, DEFAULT_COLOR_COUNT};

/// Name the keyboard step reports under.
pub const KEYBOARD_TARGET: &str = "keyboard";

/// One config file to recolor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
    pub name: String,
    /// Unset targets are skipped without a warning.
    pub path: Option<PathBuf>,
    pub strategy: Strategy,
}

impl ConfigTarget {
    /// A target tagged with its strategy's own name.
    pub fn new(strategy: Strategy, path: Option<PathBuf>) -> Self {
        Self {
            name: strategy.name().to_string(),
            path,
            strategy,
        }
    }
}

/// Outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub name: String,
    pub success: bool,
    pub message: String,
}

impl UpdateResult {
    fn from_outcome(name: &str, outcome: Result<String, ThemeError>) -> Self {
        match outcome {
            Ok(message) => {
                info!("updated {name}: {message}");
                Self {
                    name: name.to_string(),
                    success: true,
                    message,
                }
            }
            Err(e) => {
                error!("error updating {name}: {e}");
                Self {
                    name: name.to_string(),
                    success: false,
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Everything one run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub palette: Palette,
    pub results: Vec<UpdateResult>,
}

impl RunReport {
    /// True iff no target failed.
    pub fn success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn succeeded(&self) -> Vec<&str> {
        self.names(true)
    }

    pub fn failed(&self) -> Vec<&str> {
        self.names(false)
    }

    pub fn result(&self, name: &str) -> Option<&UpdateResult> {
        self.results.iter().find(|r| r.name == name)
    }

    fn names(&self, success: bool) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.success == success)
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Extracts one palette and pushes it through every configured target.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    targets: Vec<ConfigTarget>,
    color_count: usize,
    keyboard: Option<KeyboardBacklight>,
}

impl Orchestrator {
    pub fn new(targets: Vec<ConfigTarget>) -> Self {
        Self {
            targets,
            color_count: DEFAULT_COLOR_COUNT,
            keyboard: Some(KeyboardBacklight::default()),
        }
    }

    pub fn with_color_count(mut self, count: usize) -> Self {
        self.color_count = count;
        self
    }

    /// Device step to run last, or `None` to skip it.
    pub fn with_keyboard(mut self, keyboard: Option<KeyboardBacklight>) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Recolor every target from the wallpaper at `image`.
    ///
    /// Never fails as a whole: each target's error is logged and recorded,
    /// and the remaining targets still run.
    pub fn run(&self, image: &Path) -> RunReport {
        let palette = extract_dominant_colors(image, self.color_count);
        let mut results = Vec::new();

        for target in &self.targets {
            let Some(path) = target.path.as_deref() else {
                continue;
            };
            if !path.exists() && !target.strategy.creates_missing() {
                warn!("{}", ThemeError::TargetMissing(path.to_path_buf()));
                continue;
            }
            let outcome = target.strategy.apply(path, &palette);
            results.push(UpdateResult::from_outcome(&target.name, outcome));
        }

        if let Some(keyboard) = &self.keyboard {
            results.push(UpdateResult::from_outcome(
                KEYBOARD_TARGET,
                keyboard.apply(&palette),
            ));
        }

        let report = RunReport { palette, results };
        let succeeded = report.succeeded();
        let failed = report.failed();
        if !succeeded.is_empty() {
            info!("successfully updated: {}", succeeded.join(", "));
        }
        if !failed.is_empty() {
            error!("failed to update: {}", failed.join(", "));
        }
        report
    }
}
