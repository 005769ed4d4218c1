//! MoreSuits skin exporter.
//!
//! Loads a material snapshot, diffs it against an optional baseline JSON and
//! writes `Advanced/{name}.json` plus texture copies into the output directory.
//!
//! Run with: `cargo run -p moresuits-cli -- --material suit.ron --name Neon`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use moresuits_config::{CONFIG_FILE, CliArgs, Config, ConfigError};
use moresuits_export::{BaselineMapping, ExportError, ExportOptions, Exporter};
use moresuits_materials::{MaterialSnapshot, SnapshotError};
use tracing::{error, info};

/// Anything that ends a run unsuccessfully.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// 2 for usage errors, 1 for everything else.
    fn exit_code(&self) -> u8 {
        match self {
            Self::Config(ConfigError::MissingMaterial) => 2,
            _ => 1,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Loaded(PathBuf),
    Created(PathBuf),
    Defaults,
}

impl ConfigSource {
    fn describe(&self) -> String {
        match self {
            Self::Loaded(path) => format!("Loaded config from {}", path.display()),
            Self::Created(path) => format!("Created default config at {}", path.display()),
            Self::Defaults => "No config directory available, using defaults".to_string(),
        }
    }
}

/// Loads the config from `dir`, creating a default file when none exists.
fn load_config(dir: Option<&Path>) -> Result<(Config, ConfigSource), ConfigError> {
    let Some(dir) = dir else {
        return Ok((Config::default(), ConfigSource::Defaults));
    };
    let path = dir.join(CONFIG_FILE);
    let existed = path.exists();
    let config = Config::load_or_create(dir)?;
    let source = if existed {
        ConfigSource::Loaded(path)
    } else {
        ConfigSource::Created(path)
    };
    Ok((config, source))
}

/// Line printed to stderr when a run fails, independent of the log filter.
fn failure_message(err: &CliError) -> String {
    format!("moresuits: {err}")
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(Config::default_dir);
    let (mut config, source) = match load_config(config_dir.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", failure_message(&CliError::from(e)));
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    moresuits_log::init_logging(Some(&config));
    info!("{}", source.describe());

    match run(&config, args.check) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", failure_message(&e));
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &Config, check_only: bool) -> Result<(), CliError> {
    let material_path = config.material_path()?;
    let material = MaterialSnapshot::from_ron(material_path)?;
    let exporter = Exporter::new(export_options(config));
    exporter.check_shader(&material)?;

    if check_only {
        info!(
            "{} uses {} and can be exported",
            material_path.display(),
            config.shader.required_shader
        );
        return Ok(());
    }

    let baseline = match &config.export.baseline {
        Some(path) => BaselineMapping::load(path)?,
        None => BaselineMapping::empty(),
    };

    let report = exporter.export(&material, &baseline)?;
    info!(
        "Exported skin {} ({} entries, {} files) to {}",
        config.export.skin_name,
        report.mapping.len(),
        report.written.len(),
        config.export.output_dir.display()
    );
    Ok(())
}

fn export_options(config: &Config) -> ExportOptions {
    ExportOptions {
        skin_name: config.export.skin_name.clone(),
        price: config.export.price,
        output_dir: config.export.output_dir.clone(),
        ignore_properties: config.shader.ignore_properties.clone(),
        required_shader: config.shader.required_shader.clone(),
        main_texture_property: config.shader.main_texture_property.clone(),
    }
}
