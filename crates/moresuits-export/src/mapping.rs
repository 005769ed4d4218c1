//! Flat string mappings: the ordered [`ExportMapping`] being built and the
//! read-only [`BaselineMapping`] it is diffed against.

use std::collections::HashMap;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::error::ExportError;

/// Baseline value marking a keyword as explicitly disabled.
pub const DISABLE_KEYWORD: &str = "DISABLEKEYWORD";

// ---------------------------------------------------------------------------
// ExportMapping
// ---------------------------------------------------------------------------

/// Insertion-ordered map from property name to exported value.
///
/// Keys are unique; inserting an existing key replaces its value and keeps
/// its position. Serializes as a JSON object in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ExportMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ExportMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// BaselineMapping
// ---------------------------------------------------------------------------

/// Previously exported values used to drop entries that did not change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BaselineMapping(HashMap<String, String>);

impl BaselineMapping {
    /// Creates an empty baseline; every computed value counts as changed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a baseline from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Filesystem`] if the file cannot be read and
    /// [`ExportError::MalformedBaseline`] if it is not a flat object of strings.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ExportError::Filesystem {
            action: "read baseline",
            path: path.to_path_buf(),
            source,
        })?;
        let baseline =
            Self::from_json_str(&contents).map_err(|source| ExportError::MalformedBaseline {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!("Loaded {} baseline entries from {}", baseline.len(), path.display());
        Ok(baseline)
    }

    /// Parse a baseline from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Baseline value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` unless the baseline holds exactly `value` for `key`.
    pub fn differs(&self, key: &str, value: &str) -> bool {
        self.get(key) != Some(value)
    }

    /// Returns `true` if the baseline already has `keyword` enabled.
    pub fn keyword_enabled(&self, keyword: &str) -> bool {
        self.get(keyword).is_some_and(|v| v != DISABLE_KEYWORD)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the baseline holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BaselineMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_keeps_insertion_order() {
        let mut mapping = ExportMapping::new();
        mapping.insert("PRICE", "60");
        mapping.insert("_EMISSION", "KEYWORD");
        mapping.insert("_AlphaCutoff", "0.5");
        assert_eq!(
            mapping.keys().collect::<Vec<_>>(),
            ["PRICE", "_EMISSION", "_AlphaCutoff"]
        );
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut mapping = ExportMapping::new();
        mapping.insert("A", "1");
        mapping.insert("B", "2");
        mapping.insert("A", "3");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.iter().collect::<Vec<_>>(), [("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_mapping_serializes_in_insertion_order() {
        let mut mapping = ExportMapping::new();
        mapping.insert("z", "1");
        mapping.insert("a", "2");
        let json = serde_json::to_string_pretty(&mapping).unwrap();
        assert_eq!(json, "{\n  \"z\": \"1\",\n  \"a\": \"2\"\n}");
    }

    #[test]
    fn test_empty_mapping_serializes_to_empty_object() {
        let json = serde_json::to_string_pretty(&ExportMapping::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_baseline_parses_flat_object() {
        let baseline =
            BaselineMapping::from_json_str(r#"{"_Metallic": "0", "Forward": "SHADERPASS"}"#)
                .unwrap();
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline.get("_Metallic"), Some("0"));
        assert!(!baseline.differs("_Metallic", "0"));
        assert!(baseline.differs("_Metallic", "1"));
        assert!(baseline.differs("_Smoothness", "0.5"));
    }

    #[test]
    fn test_baseline_rejects_nested_or_non_string_values() {
        assert!(BaselineMapping::from_json_str(r#"{"a": {"b": "c"}}"#).is_err());
        assert!(BaselineMapping::from_json_str(r#"{"a": 1}"#).is_err());
        assert!(BaselineMapping::from_json_str(r#"["a", "b"]"#).is_err());
        assert!(BaselineMapping::from_json_str("not json").is_err());
    }

    #[test]
    fn test_keyword_enabled_ignores_disabled_marker() {
        let baseline: BaselineMapping =
            [("_EMISSION", "KEYWORD"), ("_NORMALMAP", DISABLE_KEYWORD)]
                .into_iter()
                .collect();
        assert!(baseline.keyword_enabled("_EMISSION"));
        assert!(!baseline.keyword_enabled("_NORMALMAP"));
        assert!(!baseline.keyword_enabled("_DOUBLESIDED_ON"));
    }

    #[test]
    fn test_load_malformed_baseline_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.json");
        std::fs::write(&path, "{\"a\": [1, 2]}").unwrap();

        let err = BaselineMapping::load(&path).unwrap_err();
        assert!(matches!(err, ExportError::MalformedBaseline { .. }));
        assert!(err.to_string().contains("base.json"));
    }

    #[test]
    fn test_load_missing_baseline_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BaselineMapping::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ExportError::Filesystem { .. }));
    }
}
