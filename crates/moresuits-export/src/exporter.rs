//! The exporter: turns one material into a skin descriptor plus texture copies.

use std::path::{Path, PathBuf};

use moresuits_materials::{MaterialSource, MaterialValue, format_float, format_vector};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::mapping::{BaselineMapping, ExportMapping};

/// Shader a material must use to be exported.
pub const DEFAULT_SHADER: &str = "HDRP/Lit";
/// Property holding the main albedo texture.
pub const MAIN_TEXTURE_PROPERTY: &str = "_MainTex";
/// Subdirectory of the output directory holding the descriptor and property textures.
pub const ADVANCED_DIR: &str = "Advanced";

const PRICE_KEY: &str = "PRICE";
const KEYWORD: &str = "KEYWORD";
const SHADER_PASS: &str = "SHADERPASS";
const DISABLE_SHADER_PASS: &str = "DISABLESHADERPASS";

/// Properties never exported: the base color slots the game replaces itself.
pub fn default_ignore_properties() -> Vec<String> {
    vec![MAIN_TEXTURE_PROPERTY.to_string(), "_BaseColorMap".to_string()]
}

// ---------------------------------------------------------------------------
// ExportOptions
// ---------------------------------------------------------------------------

/// Inputs to an export besides the material and baseline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Skin name; output file names derive from it.
    pub skin_name: String,
    /// In-game price. Only written when positive.
    pub price: i64,
    /// Directory receiving the exported files.
    pub output_dir: PathBuf,
    /// Property names skipped entirely.
    pub ignore_properties: Vec<String>,
    /// Shader the material must use.
    pub required_shader: String,
    /// Property whose texture is copied to `{skin}.png`; `None` disables the copy.
    pub main_texture_property: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            skin_name: "Skin".to_string(),
            price: 60,
            output_dir: PathBuf::from("Export"),
            ignore_properties: default_ignore_properties(),
            required_shader: DEFAULT_SHADER.to_string(),
            main_texture_property: Some(MAIN_TEXTURE_PROPERTY.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// ExportReport
// ---------------------------------------------------------------------------

/// Outcome of a successful export.
#[derive(Clone, Debug)]
pub struct ExportReport {
    /// Entries written to the descriptor, in file order.
    pub mapping: ExportMapping,
    /// Files written, in write order. The descriptor is always last.
    pub written: Vec<PathBuf>,
}

impl ExportReport {
    /// Path of the JSON descriptor.
    pub fn descriptor_path(&self) -> Option<&Path> {
        self.written.last().map(PathBuf::as_path)
    }
}

// ---------------------------------------------------------------------------
// Exporter
// ---------------------------------------------------------------------------

/// Exports materials according to a fixed set of [`ExportOptions`].
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    /// Creates an exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Options this exporter runs with.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Directory receiving the descriptor and property textures.
    pub fn advanced_dir(&self) -> PathBuf {
        self.options.output_dir.join(ADVANCED_DIR)
    }

    /// Checks that `material` uses the required shader.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedShader`] otherwise.
    pub fn check_shader(&self, material: &dyn MaterialSource) -> Result<(), ExportError> {
        let found = material.shader_name();
        if found != self.options.required_shader {
            return Err(ExportError::UnsupportedShader {
                expected: self.options.required_shader.clone(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Exports `material`, omitting every value equal to the one in `baseline`.
    ///
    /// Writes `{skin}.png` (main texture), `Advanced/{skin}{property}.png`
    /// (texture properties) and `Advanced/{skin}.json` under the output
    /// directory, overwriting existing files.
    ///
    /// # Errors
    ///
    /// The shader check runs before any filesystem access. An unsupported
    /// property type or a filesystem failure aborts the export; files copied
    /// before that point are kept.
    pub fn export(
        &self,
        material: &dyn MaterialSource,
        baseline: &BaselineMapping,
    ) -> Result<ExportReport, ExportError> {
        self.check_shader(material)?;

        let skin = &self.options.skin_name;
        let advanced = self.advanced_dir();
        std::fs::create_dir_all(&advanced).map_err(|source| ExportError::Filesystem {
            action: "create directory",
            path: advanced.clone(),
            source,
        })?;

        let mut mapping = ExportMapping::new();
        let mut written = Vec::new();

        // Price
        if self.options.price > 0 {
            mapping.insert(PRICE_KEY, self.options.price.to_string());
        }

        // Keywords newly enabled relative to the baseline
        for keyword in material.enabled_keywords() {
            if baseline.keyword_enabled(&keyword) {
                debug!("Keyword {keyword} already enabled in baseline");
                continue;
            }
            mapping.insert(keyword, KEYWORD);
        }

        // Render passes
        for pass in material.passes() {
            let value = if pass.enabled {
                SHADER_PASS
            } else {
                DISABLE_SHADER_PASS
            };
            insert_if_changed(&mut mapping, baseline, pass.name, value.to_string());
        }

        // Main texture
        if let Some(main) = &self.options.main_texture_property
            && let Some(src) = material.texture_asset_path(main)
        {
            let dest = self.options.output_dir.join(format!("{skin}.png"));
            copy_file(&src, &dest)?;
            info!("Exported {skin}.png");
            written.push(dest);
        }

        // Shader properties
        for decl in material.properties() {
            if self.options.ignore_properties.contains(&decl.name) {
                debug!("Ignoring property {}", decl.name);
                continue;
            }

            let ty = decl
                .property_type()
                .map_err(|_| ExportError::UnsupportedPropertyType {
                    property: decl.name.clone(),
                    type_tag: decl.type_tag.clone(),
                })?;

            if !material.has_value(&decl.name) {
                debug!("Property {} ({ty}) is not set", decl.name);
                continue;
            }
            let Some(value) = material.value(&decl.name).filter(|v| v.matches(ty)) else {
                debug!("Property {} holds no {ty} value", decl.name);
                continue;
            };

            let exported = match value {
                MaterialValue::Vector(v) => format_vector(v),
                MaterialValue::Float(x) => format_float(x),
                MaterialValue::Int(i) => i.to_string(),
                MaterialValue::Texture(_) => match material.texture_asset_path(&decl.name) {
                    Some(src) => {
                        let file_name = format!("{skin}{}.png", decl.name);
                        let dest = advanced.join(&file_name);
                        copy_file(&src, &dest)?;
                        info!("Exported {ADVANCED_DIR}/{file_name}");
                        written.push(dest);
                        file_name
                    }
                    None => {
                        debug!("Texture property {} is empty", decl.name);
                        continue;
                    }
                },
            };

            insert_if_changed(&mut mapping, baseline, decl.name, exported);
        }

        // Descriptor
        let json = serde_json::to_string_pretty(&mapping).map_err(ExportError::Serialize)?;
        let descriptor = advanced.join(format!("{skin}.json"));
        std::fs::write(&descriptor, json).map_err(|source| ExportError::Filesystem {
            action: "write",
            path: descriptor.clone(),
            source,
        })?;
        info!("Exported {ADVANCED_DIR}/{skin}.json ({} entries)", mapping.len());
        written.push(descriptor);

        Ok(ExportReport { mapping, written })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn insert_if_changed(
    mapping: &mut ExportMapping,
    baseline: &BaselineMapping,
    key: String,
    value: String,
) {
    if baseline.differs(&key, &value) {
        mapping.insert(key, value);
    } else {
        debug!("{key} matches baseline");
    }
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), ExportError> {
    debug!("Copying {} to {}", src.display(), dest.display());
    std::fs::copy(src, dest).map_err(|source| ExportError::Filesystem {
        action: "copy texture to",
        path: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}
