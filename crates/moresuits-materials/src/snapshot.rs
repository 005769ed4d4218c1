//! File-backed [`MaterialSource`]: a material captured as a RON manifest.
//!
//! Texture paths in the manifest are resolved relative to a base directory,
//! usually the directory holding the manifest file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::material::{MaterialSource, MaterialValue, PropertyDecl, RenderPass};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned while loading a [`MaterialSnapshot`].
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error reading the manifest file.
    #[error("failed to read material snapshot {path}: {source}")]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The same property is declared twice.
    #[error("duplicate property name: {0}")]
    DuplicateProperty(String),
}

// ---------------------------------------------------------------------------
// RON manifest types
// ---------------------------------------------------------------------------

/// Top-level RON manifest describing one material.
#[derive(Deserialize)]
pub struct SnapshotManifest {
    /// Shader the material uses.
    pub shader: String,
    /// Enabled shader keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Render passes in shader order.
    #[serde(default)]
    pub passes: Vec<RenderPass>,
    /// Declared properties in shader order.
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
}

/// A single property entry in the RON manifest.
#[derive(Deserialize)]
pub struct PropertyEntry {
    /// Property name.
    pub name: String,
    /// Declared type tag.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Value held by the material, if the property is set.
    #[serde(default)]
    pub value: Option<MaterialValue>,
}

// ---------------------------------------------------------------------------
// MaterialSnapshot
// ---------------------------------------------------------------------------

/// An immutable copy of a material's shader state.
#[derive(Clone, Debug, Default)]
pub struct MaterialSnapshot {
    shader: String,
    keywords: Vec<String>,
    passes: Vec<RenderPass>,
    properties: Vec<PropertyDecl>,
    values: HashMap<String, MaterialValue>,
}

impl MaterialSnapshot {
    /// Creates an empty snapshot for a material using `shader`.
    pub fn new(shader: impl Into<String>) -> Self {
        Self {
            shader: shader.into(),
            ..Default::default()
        }
    }

    /// Adds an enabled keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Appends a render pass.
    pub fn with_pass(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.passes.push(RenderPass {
            name: name.into(),
            enabled,
        });
        self
    }

    /// Declares a property, optionally with the value the material holds.
    ///
    /// Redeclaring a name replaces the earlier declaration in place.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        type_tag: impl Into<String>,
        value: Option<MaterialValue>,
    ) -> Self {
        let decl = PropertyDecl {
            name: name.into(),
            type_tag: type_tag.into(),
        };
        match value {
            Some(v) => {
                self.values.insert(decl.name.clone(), v);
            }
            None => {
                self.values.remove(&decl.name);
            }
        }
        match self.properties.iter_mut().find(|p| p.name == decl.name) {
            Some(existing) => *existing = decl,
            None => self.properties.push(decl),
        }
        self
    }

    /// Load a snapshot from a RON manifest on disk.
    ///
    /// Relative texture paths resolve against the manifest's directory.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] on I/O, parse, or validation failures.
    pub fn from_ron(path: &Path) -> Result<Self, SnapshotError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_ron_str(&contents, base_dir)
    }

    /// Load a snapshot from a RON string. Texture paths are resolved
    /// relative to `texture_base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] on parse or validation failures.
    pub fn from_ron_str(ron_str: &str, texture_base_dir: &Path) -> Result<Self, SnapshotError> {
        let manifest: SnapshotManifest = ron::from_str(ron_str)?;

        let mut properties = Vec::with_capacity(manifest.properties.len());
        let mut values = HashMap::new();

        for entry in manifest.properties {
            if properties.iter().any(|p: &PropertyDecl| p.name == entry.name) {
                return Err(SnapshotError::DuplicateProperty(entry.name));
            }

            if let Some(value) = entry.value {
                values.insert(entry.name.clone(), resolve_texture(value, texture_base_dir));
            }
            properties.push(PropertyDecl {
                name: entry.name,
                type_tag: entry.type_tag,
            });
        }

        Ok(Self {
            shader: manifest.shader,
            keywords: manifest.keywords,
            passes: manifest.passes,
            properties,
            values,
        })
    }
}

impl MaterialSource for MaterialSnapshot {
    fn shader_name(&self) -> &str {
        &self.shader
    }

    fn enabled_keywords(&self) -> Vec<String> {
        self.keywords.clone()
    }

    fn passes(&self) -> Vec<RenderPass> {
        self.passes.clone()
    }

    fn properties(&self) -> Vec<PropertyDecl> {
        self.properties.clone()
    }

    fn value(&self, name: &str) -> Option<MaterialValue> {
        self.values.get(name).cloned()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_texture(value: MaterialValue, base_dir: &Path) -> MaterialValue {
    match value {
        MaterialValue::Texture(Some(path)) if path.is_relative() => {
            MaterialValue::Texture(Some(base_dir.join(path)))
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ron() -> &'static str {
        r#"SnapshotManifest(
            shader: "HDRP/Lit",
            keywords: ["_EMISSION", "_NORMALMAP"],
            passes: [
                (name: "Forward", enabled: true),
                (name: "TransparentBackface", enabled: false),
            ],
            properties: [
                (name: "_BaseColor", type: "Color", value: Some(Vector((1.0, 0.5, 0.0, 1.0)))),
                (name: "_Smoothness", type: "Range", value: Some(Float(0.5))),
                (name: "_NormalMap", type: "Texture", value: Some(Texture(Some("tex/normal.png")))),
                (name: "_MaskMap", type: "Texture", value: Some(Texture(None))),
                (name: "_StencilRef", type: "Int"),
            ],
        )"#
    }

    #[test]
    fn test_snapshot_loads_from_ron() {
        let snapshot = MaterialSnapshot::from_ron_str(sample_ron(), Path::new("assets")).unwrap();
        assert_eq!(snapshot.shader_name(), "HDRP/Lit");
        assert_eq!(snapshot.enabled_keywords(), ["_EMISSION", "_NORMALMAP"]);
        assert_eq!(snapshot.passes().len(), 2);
        assert!(!snapshot.passes()[1].enabled);

        let names: Vec<_> = snapshot.properties().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["_BaseColor", "_Smoothness", "_NormalMap", "_MaskMap", "_StencilRef"]
        );
    }

    #[test]
    fn test_unset_property_has_no_value() {
        let snapshot = MaterialSnapshot::from_ron_str(sample_ron(), Path::new("assets")).unwrap();
        assert!(!snapshot.has_value("_StencilRef"));
        assert!(snapshot.has_value("_Smoothness"));
        assert_eq!(snapshot.value("_Smoothness"), Some(MaterialValue::Float(0.5)));
    }

    #[test]
    fn test_relative_texture_paths_resolve_against_base_dir() {
        let snapshot = MaterialSnapshot::from_ron_str(sample_ron(), Path::new("assets")).unwrap();
        assert_eq!(
            snapshot.texture_asset_path("_NormalMap"),
            Some(PathBuf::from("assets").join("tex/normal.png"))
        );
        assert!(snapshot.has_value("_MaskMap"));
        assert_eq!(snapshot.texture_asset_path("_MaskMap"), None);
        assert_eq!(snapshot.texture_asset_path("_Smoothness"), None);
    }

    #[test]
    fn test_unknown_type_tag_is_kept() {
        let ron = r#"(shader: "HDRP/Lit", properties: [(name: "_M", type: "Matrix")])"#;
        let snapshot = MaterialSnapshot::from_ron_str(ron, Path::new("")).unwrap();
        let decl = &snapshot.properties()[0];
        assert_eq!(decl.type_tag, "Matrix");
        assert!(decl.property_type().is_err());
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let ron = r#"(
            shader: "HDRP/Lit",
            properties: [
                (name: "_Metallic", type: "Range"),
                (name: "_Metallic", type: "Float"),
            ],
        )"#;
        let result = MaterialSnapshot::from_ron_str(ron, Path::new(""));
        assert!(matches!(result, Err(SnapshotError::DuplicateProperty(name)) if name == "_Metallic"));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result = MaterialSnapshot::from_ron_str("{{not valid}}", Path::new(""));
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_from_ron_file_resolves_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suit.ron");
        std::fs::write(&path, sample_ron()).unwrap();

        let snapshot = MaterialSnapshot::from_ron(&path).unwrap();
        assert_eq!(
            snapshot.texture_asset_path("_NormalMap"),
            Some(dir.path().join("tex/normal.png"))
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");
        let err = MaterialSnapshot::from_ron(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
        assert!(err.to_string().contains("missing.ron"));
    }

    #[test]
    fn test_builder_redeclares_in_place() {
        let snapshot = MaterialSnapshot::new("HDRP/Lit")
            .with_property("_A", "Float", Some(MaterialValue::Float(1.0)))
            .with_property("_B", "Int", Some(MaterialValue::Int(2)))
            .with_property("_A", "Range", None);

        let props = snapshot.properties();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "_A");
        assert_eq!(props[0].type_tag, "Range");
        assert!(!snapshot.has_value("_A"));
    }
}
