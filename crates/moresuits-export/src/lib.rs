//! Skin export for MoreSuits.
//!
//! Reads a material through [`moresuits_materials::MaterialSource`], diffs every
//! keyword, render pass and shader property against a baseline, and writes the
//! changed entries to `Advanced/{skin}.json` next to copies of the textures.

mod error;
mod exporter;
mod mapping;


pub use error::ExportError;
pub use exporter::{
    ADVANCED_DIR, DEFAULT_SHADER, ExportOptions, ExportReport, Exporter, MAIN_TEXTURE_PROPERTY,
    default_ignore_properties,
};
pub use mapping::{BaselineMapping, DISABLE_KEYWORD, ExportMapping};
