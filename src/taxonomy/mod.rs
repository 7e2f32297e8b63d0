//! Primary OSM tag taxonomy.
//!
//! The taxonomy is the fixed mapping of recognized tag keys (and
//! optionally allowed values) that determines which map elements are
//! queried and how the resulting features are classified. It is loaded
//! once at startup and shared read-only between the query builder and
//! the feature transformer.
//!
//! The embedded default set follows the Soundscape primary tag mapping.

use std::collections::BTreeMap;

use thiserror::Error;

/// Default tag set, mirroring the Soundscape `mapping.yml` selection.
const DEFAULT_TAGS_JSON: &str = include_str!("../../data/osm_tags.json");

/// Error type for taxonomy loading.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("taxonomy root must be an object mapping tag keys to value lists")]
    NotAnObject,
    #[error("allowed values for tag '{key}' must be an array of strings")]
    InvalidValues { key: String },
}

/// One taxonomy entry: a tag key and its allowed values.
///
/// An empty value list matches any value for the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub key: String,
    pub values: Vec<String>,
}

/// Ordered, immutable mapping of recognized tag keys to allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTaxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl TagTaxonomy {
    /// Parse a taxonomy from a JSON object of `key -> [values]`.
    ///
    /// Entry order follows the order of keys in the document (the
    /// query builder relies on this for deterministic query text).
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        let object = root.as_object().ok_or(TaxonomyError::NotAnObject)?;

        let mut entries = Vec::with_capacity(object.len());
        for (key, raw_values) in object {
            let array = raw_values
                .as_array()
                .ok_or_else(|| TaxonomyError::InvalidValues { key: key.clone() })?;
            let values = array
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| TaxonomyError::InvalidValues { key: key.clone() })
                })
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(TaxonomyEntry {
                key: key.clone(),
                values,
            });
        }

        Ok(Self { entries })
    }

    /// Iterate entries in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        self.entries.iter()
    }

    /// Whether `key` is a recognized tag key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Find the primary tag of an element: the first taxonomy entry
    /// (in taxonomy order) whose key appears in `tags`.
    pub fn primary_tag<'a>(&self, tags: &'a BTreeMap<String, String>) -> Option<(&'a str, &'a str)> {
        self.entries.iter().find_map(|entry| {
            tags.get_key_value(entry.key.as_str())
                .map(|(k, v)| (k.as_str(), v.as_str()))
        })
    }

    /// Returns the number of entries in the taxonomy.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the taxonomy has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagTaxonomy {
    fn default() -> Self {
        Self::from_json_str(DEFAULT_TAGS_JSON).expect("embedded osm_tags.json is valid")
    }
}
