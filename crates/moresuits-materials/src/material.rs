//! Core material types: [`ShaderPropertyType`], [`MaterialValue`], and the
//! [`MaterialSource`] capability trait the exporter reads from.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ShaderPropertyType
// ---------------------------------------------------------------------------

/// Declared type of a shader property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderPropertyType {
    /// RGBA color, stored as a four-component vector.
    Color,
    /// Four-component vector.
    Vector,
    /// Scalar float.
    Float,
    /// Scalar float constrained to a range in the shader UI.
    Range,
    /// Texture slot.
    Texture,
    /// Integer.
    Int,
}

/// Returned when a type tag names no known [`ShaderPropertyType`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized shader property type `{0}`")]
pub struct UnknownPropertyType(pub String);

impl FromStr for ShaderPropertyType {
    type Err = UnknownPropertyType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "color" => Ok(Self::Color),
            "vector" => Ok(Self::Vector),
            "float" => Ok(Self::Float),
            "range" => Ok(Self::Range),
            "texture" => Ok(Self::Texture),
            "int" => Ok(Self::Int),
            _ => Err(UnknownPropertyType(tag.to_string())),
        }
    }
}

impl fmt::Display for ShaderPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "Color",
            Self::Vector => "Vector",
            Self::Float => "Float",
            Self::Range => "Range",
            Self::Texture => "Texture",
            Self::Int => "Int",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// One property declared by the material's shader, in declaration order.
///
/// The type is kept as its textual tag; shaders may declare types this crate
/// does not know, and rejecting them is the caller's decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Property name (e.g. `_BaseColor`).
    pub name: String,
    /// Type tag as declared by the shader (e.g. `Color`, `Range`).
    pub type_tag: String,
}

impl PropertyDecl {
    /// Parses the declared type tag.
    pub fn property_type(&self) -> Result<ShaderPropertyType, UnknownPropertyType> {
        self.type_tag.parse()
    }
}

/// A named render pass and whether it is enabled on the material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPass {
    /// Pass name (e.g. `Forward`, `TransparentDepthPrepass`).
    pub name: String,
    /// Whether the pass is enabled.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// MaterialValue
// ---------------------------------------------------------------------------

/// The value a material holds for one property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MaterialValue {
    /// Color or vector components.
    Vector((f32, f32, f32, f32)),
    /// Float or range scalar.
    Float(f32),
    /// Integer.
    Int(i32),
    /// Texture slot; `None` when the slot exists but holds no texture.
    Texture(Option<PathBuf>),
}

impl MaterialValue {
    /// Returns `true` if this value is what a property of type `ty` holds.
    pub fn matches(&self, ty: ShaderPropertyType) -> bool {
        matches!(
            (self, ty),
            (
                Self::Vector(_),
                ShaderPropertyType::Color | ShaderPropertyType::Vector
            ) | (
                Self::Float(_),
                ShaderPropertyType::Float | ShaderPropertyType::Range
            ) | (Self::Int(_), ShaderPropertyType::Int)
                | (Self::Texture(_), ShaderPropertyType::Texture)
        )
    }
}

/// Formats vector components with two decimals, separated by `", "`.
pub fn format_vector((x, y, z, w): (f32, f32, f32, f32)) -> String {
    format!("{x:.2}, {y:.2}, {z:.2}, {w:.2}")
}

/// Formats a float as its shortest round-trip decimal (`1.0` -> `"1"`).
///
/// Output is always positional: `1e-5` is `"0.00001"` and `1e7` is
/// `"10000000"`, never `"1E-05"` / `"1E+07"`. Baselines holding exponent
/// notation compare as different for such values.
pub fn format_float(x: f32) -> String {
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    x.to_string()
}

// ---------------------------------------------------------------------------
// MaterialSource
// ---------------------------------------------------------------------------

/// Read-only view over a material, as provided by the host engine.
pub trait MaterialSource {
    /// Name of the shader the material uses.
    fn shader_name(&self) -> &str;

    /// Enabled shader keywords.
    fn enabled_keywords(&self) -> Vec<String>;

    /// Render passes in shader order.
    fn passes(&self) -> Vec<RenderPass>;

    /// Declared shader properties in shader order.
    fn properties(&self) -> Vec<PropertyDecl>;

    /// Value the material holds for `name`, if any.
    fn value(&self, name: &str) -> Option<MaterialValue>;

    /// Returns `true` if the material holds a value for `name`.
    fn has_value(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Path of the backing file of the texture assigned to `name`.
    fn texture_asset_path(&self, name: &str) -> Option<PathBuf> {
        match self.value(name)? {
            MaterialValue::Texture(path) => path,
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
