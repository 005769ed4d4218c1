//! Material model: shader property types, material values, the [`MaterialSource`]
//! capability trait, and a RON-backed [`MaterialSnapshot`].

mod material;
mod snapshot;

pub use material::{
    MaterialSource, MaterialValue, PropertyDecl, RenderPass, ShaderPropertyType,
    UnknownPropertyType, format_float, format_vector,
};
pub use snapshot::{MaterialSnapshot, PropertyEntry, SnapshotError, SnapshotManifest};
