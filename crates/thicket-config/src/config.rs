//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thicket_lod::{BuildOptions, LodSettings};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "thicket.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Level-of-detail engine settings.
    pub lod: LodConfig,
    /// Generated point field used by the demo.
    pub field: FieldConfig,
    /// Demo driver settings.
    pub demo: DemoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Level-of-detail engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Points beyond this distance are never drawn.
    pub max_distance: f32,
    /// Points nearer than this use the densest level.
    pub min_distance: f32,
    /// Instance budget per frame.
    pub max_count: usize,
    /// Maximum points per index leaf.
    pub max_leaf_size: usize,
    /// Maximum index depth.
    pub max_tree_depth: u32,
}

/// Random point field configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of points to scatter.
    pub point_count: usize,
    /// Side length of the square area, centred on the origin.
    pub extent: f32,
    /// RNG seed; the same seed always produces the same field.
    pub seed: u64,
    /// Scale range applied uniformly per point.
    pub min_scale: f32,
    pub max_scale: f32,
}

/// Demo driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of simulated frames.
    pub frames: u32,
    /// Run the selection every N frames.
    pub update_interval: u32,
    /// Orbit radius of the camera around the field centre.
    pub orbit_radius: f32,
    /// Camera height above the ground plane.
    pub camera_height: f32,
    /// Orbit speed in radians per frame.
    pub orbit_speed: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the console output.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for LodConfig {
    fn default() -> Self {
        let settings = LodSettings::default();
        Self {
            max_distance: settings.max_distance,
            min_distance: settings.min_distance,
            max_count: settings.max_count,
            max_leaf_size: settings.build.max_leaf_size,
            max_tree_depth: settings.build.max_depth,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            point_count: 100_000,
            extent: 200.0,
            seed: 0x7417_c4e7,
            min_scale: 0.6,
            max_scale: 1.4,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            update_interval: 5,
            orbit_radius: 40.0,
            camera_height: 2.0,
            orbit_speed: 0.01,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl LodConfig {
    /// Engine settings for these values. Validation happens when the engine
    /// is constructed.
    pub fn to_settings(&self) -> LodSettings {
        LodSettings {
            max_distance: self.max_distance,
            min_distance: self.min_distance,
            max_count: self.max_count,
            build: BuildOptions {
                max_leaf_size: self.max_leaf_size,
                max_depth: self.max_tree_depth,
            },
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `thicket.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
