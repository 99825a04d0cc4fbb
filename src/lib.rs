//! Derive a color theme from a wallpaper and push it into desktop tool configs.
//!
//! One palette is extracted per run; every config target derives its own
//! colors from it and rewrites only the region of its file that it owns.

pub mod cli;
pub mod color;
pub mod device;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod rewriters;
pub mod theme;
