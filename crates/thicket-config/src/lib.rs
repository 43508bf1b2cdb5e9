//! Configuration for the thicket crates.
//!
//! Settings persist to disk as RON and can be overridden from the command
//! line. Unknown fields are ignored and missing ones fall back to defaults,
//! so old config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, DemoConfig, FieldConfig, LodConfig};
pub use error::ConfigError;
