use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::device::{KeyboardBacklight, DEFAULT_PROGRAM};
use crate::orchestrator::ConfigTarget;
use crate::rewriters::Strategy;

/// Recolor desktop tool configs from a wallpaper image.
#[derive(Parser, Debug)]
#[command(name = "wallsync", version, about)]
pub struct Args {
    /// Path to the wallpaper image
    pub image: PathBuf,

    /// Desktop family and its config paths
    #[command(subcommand)]
    pub family: Family,

    /// Number of dominant colors to extract
    #[arg(
        short = 'k',
        long = "colors",
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=64)
    )]
    pub colors: u8,

    /// Skip the keyboard backlight step
    #[arg(long)]
    pub no_keyboard: bool,

    /// Program used to drive the keyboard backlight
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub keyboard_cli: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Supported desktop families, each with a fixed, ordered set of configs.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Family {
    /// i3 with kitty, dunst, i3blocks and neovim
    I3 {
        i3_config: PathBuf,
        kitty_config: PathBuf,
        dunst_config: PathBuf,
        i3blocks_config: PathBuf,
        nvim_config: PathBuf,
    },
    /// Hyprland with kitty, mako, waybar and neovim ("None" skips an optional path).
    /// A single optional path is taken as the neovim config.
    Hyprland {
        hyprland_config: PathBuf,
        kitty_config: PathBuf,
        mako_config: PathBuf,
        waybar_config: Option<String>,
        waybar_style: Option<String>,
        nvim_config: Option<String>,
    },
}

impl Family {
    /// The family's targets in processing order.
    pub fn targets(&self) -> Vec<ConfigTarget> {
        match self {
            Family::I3 {
                i3_config,
                kitty_config,
                dunst_config,
                i3blocks_config,
                nvim_config,
            } => vec![
                ConfigTarget::new(Strategy::I3, Some(i3_config.clone())),
                ConfigTarget::new(Strategy::Kitty, Some(kitty_config.clone())),
                ConfigTarget::new(Strategy::Dunst, Some(dunst_config.clone())),
                ConfigTarget::new(Strategy::I3blocks, Some(i3blocks_config.clone())),
                ConfigTarget::new(Strategy::Nvim, Some(nvim_config.clone())),
            ],
            Family::Hyprland {
                hyprland_config,
                kitty_config,
                mako_config,
                waybar_config,
                waybar_style,
                nvim_config,
            } => {
                // `<hyprland> <kitty> <mako> <nvim>`: the lone trailing path is neovim's.
                let (waybar_config, nvim_config) =
                    if waybar_style.is_none() && nvim_config.is_none() {
                        (None, optional_path(waybar_config))
                    } else {
                        (optional_path(waybar_config), optional_path(nvim_config))
                    };
                vec![
                    ConfigTarget::new(Strategy::Hyprland, Some(hyprland_config.clone())),
                    ConfigTarget::new(Strategy::Kitty, Some(kitty_config.clone())),
                    ConfigTarget::new(Strategy::Mako, Some(mako_config.clone())),
                    ConfigTarget::new(Strategy::WaybarConfig, waybar_config),
                    ConfigTarget::new(Strategy::WaybarStyle, optional_path(waybar_style)),
                    ConfigTarget::new(Strategy::Nvim, nvim_config),
                ]
            }
        }
    }
}

impl Args {
    pub fn keyboard(&self) -> Option<KeyboardBacklight> {
        (!self.no_keyboard).then(|| KeyboardBacklight::new(&self.keyboard_cli))
    }
}

/// `None`, an empty string, or an absent argument all mean "not configured".
fn optional_path(arg: &Option<String>) -> Option<PathBuf> {
    arg.as_deref()
        .filter(|s| !s.is_empty() && *s != "None")
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wallsync").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn i3_family_orders_targets() {
        let args = parse(&["wall.png", "i3", "a", "b", "c", "d", "e"]);
        let names: Vec<String> = args.family.targets().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["i3", "kitty", "dunst", "i3blocks", "nvim"]);
    }

    #[test]
    fn i3_family_requires_every_path() {
        let result = Args::try_parse_from(["wallsync", "wall.png", "i3", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn hyprland_optional_paths_accept_none() {
        let args = parse(&["wall.png", "hyprland", "h", "k", "m", "None", "style.css"]);
        let targets = args.family.targets();
        assert_eq!(targets.len(), 6);
        assert_eq!(targets[3].path, None);
        assert_eq!(targets[4].path, Some(PathBuf::from("style.css")));
        assert_eq!(targets[5].path, None);
    }

    #[test]
    fn hyprland_single_optional_path_is_nvim() {
        let args = parse(&["wall.png", "hyprland", "h", "k", "m", "init.vim"]);
        let targets = args.family.targets();
        assert_eq!(targets[3].path, None);
        assert_eq!(targets[4].path, None);
        assert_eq!(targets[5].name, "nvim");
        assert_eq!(targets[5].path, Some(PathBuf::from("init.vim")));
    }

    #[test]
    fn hyprland_three_optional_paths_keep_their_slots() {
        let args = parse(&["wall.png", "hyprland", "h", "k", "m", "w.json", "s.css", "init.vim"]);
        let paths: Vec<Option<PathBuf>> =
            args.family.targets().into_iter().map(|t| t.path).collect();
        assert_eq!(paths[3], Some(PathBuf::from("w.json")));
        assert_eq!(paths[4], Some(PathBuf::from("s.css")));
        assert_eq!(paths[5], Some(PathBuf::from("init.vim")));
    }

    #[test]
    fn defaults() {
        let args = parse(&["wall.png", "i3", "a", "b", "c", "d", "e"]);
        assert_eq!(args.colors, 5);
        assert!(args.keyboard().is_some());
        assert!(!args.verbose);
    }

    #[test]
    fn no_keyboard_disables_device_step() {
        let args = parse(&["--no-keyboard", "wall.png", "i3", "a", "b", "c", "d", "e"]);
        assert!(args.keyboard().is_none());
    }

    #[test]
    fn color_count_is_bounded() {
        assert!(
            Args::try_parse_from(["wallsync", "-k", "0", "wall.png", "i3", "a", "b", "c", "d", "e"])
                .is_err()
        );
    }
}
