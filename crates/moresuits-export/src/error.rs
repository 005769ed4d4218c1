//! Export error types.

use std::path::PathBuf;

/// Errors that abort an export.
///
/// Files written before the failure point are left on disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The material does not use the shader the exporter requires.
    #[error("material uses shader `{found}`, expected `{expected}`")]
    UnsupportedShader {
        /// Required shader name.
        expected: String,
        /// Shader the material uses.
        found: String,
    },

    /// A declared property has a type the exporter cannot encode.
    #[error("property `{property}` has unsupported type `{type_tag}`")]
    UnsupportedPropertyType {
        /// Property name.
        property: String,
        /// Declared type tag.
        type_tag: String,
    },

    /// Creating a directory, copying a texture, or writing the descriptor failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        /// What was being attempted (e.g. "copy texture to").
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The baseline file is not a flat JSON object of strings.
    #[error("malformed baseline {}: {source}", path.display())]
    MalformedBaseline {
        /// Baseline path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the export mapping.
    #[error("failed to serialize export: {0}")]
    Serialize(#[source] serde_json::Error),
}
