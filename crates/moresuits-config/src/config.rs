//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration.
pub const CONFIG_FILE: &str = "moresuits.ron";

/// Top-level exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to export and where.
    pub export: ExportConfig,
    /// Shader requirements and property filtering.
    pub shader: ShaderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Export inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Material snapshot (RON) to export.
    pub material: Option<PathBuf>,
    /// Baseline JSON used to drop default values.
    pub baseline: Option<PathBuf>,
    /// Name of the generated skin.
    pub skin_name: String,
    /// Price of the suit in-game; omitted from the export unless positive.
    pub price: i64,
    /// Directory receiving the exported files.
    pub output_dir: PathBuf,
}

/// Shader requirements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShaderConfig {
    /// Shader the material must use.
    pub required_shader: String,
    /// Property whose texture becomes `{skin}.png`. `None` skips the copy.
    pub main_texture_property: Option<String>,
    /// Properties never exported.
    pub ignore_properties: Vec<String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON-formatted logs to this file.
    pub log_file: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            material: None,
            baseline: None,
            skin_name: "Skin".to_string(),
            price: 60,
            output_dir: PathBuf::from("Export"),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            required_shader: "HDRP/Lit".to_string(),
            main_texture_property: Some("_MainTex".to_string()),
            ignore_properties: vec!["_MainTex".to_string(), "_BaseColorMap".to_string()],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Default config directory (`<platform config dir>/moresuits`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("moresuits"))
    }

    /// Material snapshot to export.
    pub fn material_path(&self) -> Result<&Path, ConfigError> {
        self.export
            .material
            .as_deref()
            .ok_or(ConfigError::MissingMaterial)
    }

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

    /// Save config to the given directory as `moresuits.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
