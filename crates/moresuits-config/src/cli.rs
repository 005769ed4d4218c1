//! Command-line argument parsing for the MoreSuits exporter.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// MoreSuits exporter command-line arguments.
///
/// CLI values override settings loaded from `moresuits.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "moresuits",
    about = "Export a material as a MoreSuits skin (JSON descriptor + textures)"
)]
pub struct CliArgs {
    /// Material snapshot to export (RON).
    #[arg(long, short)]
    pub material: Option<PathBuf>,

    /// Baseline JSON generated from the default material.
    #[arg(long, short)]
    pub baseline: Option<PathBuf>,

    /// Name of the generated skin.
    #[arg(long, short)]
    pub name: Option<String>,

    /// Price of the suit in-game.
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<i64>,

    /// Directory to export to.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not copy the main texture to `{name}.png`.
    #[arg(long)]
    pub no_main_texture: bool,

    /// Property to skip (repeatable; replaces the configured list).
    #[arg(long = "ignore", value_name = "PROPERTY")]
    pub ignore: Vec<String>,

    /// Only check that the material uses the required shader.
    #[arg(long)]
    pub check: bool,

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
        if let Some(ref material) = args.material {
            self.export.material = Some(material.clone());
        }
        if let Some(ref baseline) = args.baseline {
            self.export.baseline = Some(baseline.clone());
        }
        if let Some(ref name) = args.name {
            self.export.skin_name = name.clone();
        }
        if let Some(price) = args.price {
            self.export.price = price;
        }
        if let Some(ref output) = args.output {
            self.export.output_dir = output.clone();
        }
        if args.no_main_texture {
            self.shader.main_texture_property = None;
        }
        if !args.ignore.is_empty() {
            self.shader.ignore_properties = args.ignore.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            material: Some(PathBuf::from("suit.ron")),
            name: Some("Neon".to_string()),
            price: Some(0),
            no_main_texture: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.export.material, Some(PathBuf::from("suit.ron")));
        assert_eq!(config.export.skin_name, "Neon");
        assert_eq!(config.export.price, 0);
        assert_eq!(config.shader.main_texture_property, None);
        // Non-overridden fields retain defaults
        assert_eq!(config.export.output_dir, PathBuf::from("Export"));
        assert_eq!(config.shader.ignore_properties.len(), 2);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_ignore_list_replaced() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "moresuits",
            "--ignore",
            "_MainTex",
            "--ignore",
            "_EmissiveColorMap",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(
            config.shader.ignore_properties,
            ["_MainTex", "_EmissiveColorMap"]
        );
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = CliArgs::parse_from([
            "moresuits",
            "-m",
            "suit.ron",
            "-b",
            "HDRPLit.json",
            "-n",
            "Neon",
            "--price",
            "-5",
            "-o",
            "out",
            "--check",
        ]);
        assert_eq!(args.material, Some(PathBuf::from("suit.ron")));
        assert_eq!(args.baseline, Some(PathBuf::from("HDRPLit.json")));
        assert_eq!(args.name.as_deref(), Some("Neon"));
        assert_eq!(args.price, Some(-5));
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert!(args.check);
    }
}
