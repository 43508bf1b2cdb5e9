//! Command-line argument parsing for the thicket demo.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Thicket command-line arguments.
///
/// CLI values override settings loaded from `thicket.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "thicket", about = "Instanced point-cloud LOD demo")]
pub struct CliArgs {
    /// Number of points in the generated field.
    #[arg(long)]
    pub points: Option<usize>,

    /// Field RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Instance budget per frame.
    #[arg(long)]
    pub max_count: Option<usize>,

    /// Maximum draw distance.
    #[arg(long)]
    pub max_distance: Option<f32>,

    /// Distance below which the densest level is used.
    #[arg(long)]
    pub min_distance: Option<f32>,

    /// Number of simulated frames.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Run the selection every N frames.
    #[arg(long)]
    pub update_interval: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(points) = args.points {
            self.field.point_count = points;
        }
        if let Some(seed) = args.seed {
            self.field.seed = seed;
        }
        if let Some(max_count) = args.max_count {
            self.lod.max_count = max_count;
        }
        if let Some(max_distance) = args.max_distance {
            self.lod.max_distance = max_distance;
        }
        if let Some(min_distance) = args.min_distance {
            self.lod.min_distance = min_distance;
        }
        if let Some(frames) = args.frames {
            self.demo.frames = frames;
        }
        if let Some(interval) = args.update_interval {
            self.demo.update_interval = interval;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
