//! Complete and partial style value collections.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::key::{StyleFamily, StyleKey};

/// A complete, validated mapping from every [`StyleKey`] to its value.
///
/// Style maps are only produced by the registry and the resolver, so every
/// value satisfies its key's rule. Iteration follows the canonical key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMap {
    values: Vec<String>,
}

impl StyleMap {
    pub(crate) fn from_values(values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), StyleKey::COUNT);
        Self { values }
    }

    /// Stores a value that has already passed the key's rule.
    pub(crate) fn set_checked(&mut self, key: StyleKey, value: String) {
        self.values[key.index()] = value;
    }

    pub fn get(&self, key: StyleKey) -> &str {
        &self.values[key.index()]
    }

    /// Iterates over `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        StyleKey::all()
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Iterates over the entries of one family in canonical order.
    pub fn family(&self, family: StyleFamily) -> impl Iterator<Item = (StyleKey, &str)> {
        self.iter().filter(move |(key, _)| key.family() == family)
    }

    /// Returns one family as a stored record (option name to value).
    pub fn to_record(&self, family: StyleFamily) -> BTreeMap<String, String> {
        self.family(family)
            .map(|(key, value)| (key.as_str().to_string(), value.to_string()))
            .collect()
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// A partial, unvalidated set of style values.
///
/// Overrides come from stored records, widget settings or submitted forms.
/// Values are kept verbatim; the resolver validates them. An empty value
/// means "unset" and is treated as if the key were absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    values: BTreeMap<StyleKey, String>,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, returning the updated overrides for chaining.
    pub fn with(mut self, key: StyleKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: StyleKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Returns the value for `key`, or `None` if it is absent or empty.
    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values
            .get(&key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Keeps only the entries of `family`.
    pub fn only(mut self, family: StyleFamily) -> Self {
        self.values.retain(|key, _| key.family() == family);
        self
    }

    /// Adds every entry of `other`, replacing existing values.
    pub fn extend(&mut self, other: &StyleOverrides) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Builds overrides from a stored record.
    ///
    /// Unknown names are skipped. Numbers are kept as their decimal text;
    /// other non-string values are kept as JSON text so they fail validation
    /// and resolve to the default.
    pub fn from_record<'a, I>(record: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
    {
        let mut overrides = Self::new();
        for (name, value) in record {
            let Ok(key) = name.parse::<StyleKey>() else {
                tracing::debug!("Skipping unknown style key '{}'", name);
                continue;
            };
            let text = match value {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            overrides.insert(key, text);
        }
        overrides
    }
}

impl FromIterator<(StyleKey, String)> for StyleOverrides {
    fn from_iter<I: IntoIterator<Item = (StyleKey, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Serialize for StyleOverrides {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_record(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::key::{ColorKey, FontProperty, TextElement};
    use crate::style::StyleRegistry;
    use serde_json::json;

    fn title() -> StyleKey {
        StyleKey::Color(ColorKey::Title)
    }

    // =========================================================================
    // StyleMap
    // =========================================================================

    #[test]
    fn test_map_iterates_in_canonical_order() {
        let map = StyleRegistry::new().defaults();
        let keys: Vec<StyleKey> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, StyleKey::all());
    }

    #[test]
    fn test_map_family_record() {
        let map = StyleRegistry::new().defaults();
        let record = map.to_record(StyleFamily::Colors);
        assert_eq!(record.len(), 10);
        assert_eq!(record["title_color"], "#1a202c");
        assert!(!record.contains_key("title_font_size"));
    }

    #[test]
    fn test_map_serializes_by_option_name() {
        let map = StyleRegistry::new().defaults();
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["background_color"], "#f9f9f9");
        assert_eq!(value["type_badge_font_weight"], "600");
    }

    // =========================================================================
    // StyleOverrides
    // =========================================================================

    #[test]
    fn test_overrides_empty_value_is_unset() {
        let overrides = StyleOverrides::new().with(title(), "");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get(title()), None);
    }

    #[test]
    fn test_overrides_only_family() {
        let size = StyleKey::typography(TextElement::Size, FontProperty::FontSize);
        let overrides = StyleOverrides::new()
            .with(title(), "#111111")
            .with(size, "12px")
            .only(StyleFamily::Typography);
        assert_eq!(overrides.get(title()), None);
        assert_eq!(overrides.get(size), Some("12px"));
    }

    #[test]
    fn test_overrides_from_record() {
        let record: BTreeMap<String, serde_json::Value> = serde_json::from_value(json!({
            "title_color": "#123456",
            "title_font_weight": 700,
            "size_color": ["not", "a", "color"],
            "unknown_key": "#ffffff"
        }))
        .unwrap();

        let overrides = StyleOverrides::from_record(&record);
        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides.get(title()), Some("#123456"));
        assert_eq!(
            overrides.get(StyleKey::typography(
                TextElement::Title,
                FontProperty::FontWeight
            )),
            Some("700")
        );
        assert_eq!(
            overrides.get(StyleKey::Color(ColorKey::Size)),
            Some("[\"not\",\"a\",\"color\"]")
        );
    }

    #[test]
    fn test_overrides_deserialize() {
        let overrides: StyleOverrides =
            serde_json::from_str(r##"{"title_color": "#222222"}"##).unwrap();
        assert_eq!(overrides.get(title()), Some("#222222"));
    }
}
