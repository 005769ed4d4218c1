//! Configuration for the MoreSuits exporter.
//!
//! Settings persist to disk as a RON file and can be overridden per run via
//! clap-parsed command-line arguments. Serialization is forward/backward
//! compatible: missing fields take their defaults, unknown fields are ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, ExportConfig, ShaderConfig};
pub use error::ConfigError;
