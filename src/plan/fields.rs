//! Order-preserving `field -> type tag` mapping for plan models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Model fields in declaration order.
///
/// Deserializes from a JSON object and keeps the key order of the input, so
/// generated code lists fields the way the plan lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(IndexMap<String, Option<String>>);

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. A later entry with the same name replaces the earlier tag in place.
    pub fn insert(&mut self, name: impl Into<String>, tag: Option<String>) {
        self.0.insert(name.into(), tag);
    }

    /// Iterates fields in order. Empty tags are reported as unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(name, tag)| {
            (name.as_str(), tag.as_deref().map(str::trim).filter(|t| !t.is_empty()))
        })
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the model declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, tag)| (name.into(), tag)).collect())
    }
}
