// Style objects and the per-type style map.
//
// A `Style` is a flat property → value map in the camelCase vocabulary of
// native UI toolkits (`fontSize`, `marginTop`). Composition is a plain
// overlay: later styles win property by property.

mod css;
pub(crate) mod defaults;
mod text_only;

pub use css::convert_additional_styles;
pub use defaults::default_styles;
pub use text_only::{is_text_style_only_prop, text_only_style, TEXT_STYLE_ONLY_PROPS};

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A single style property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Bool(bool),
    Text(String),
    /// `{ width, height }` pairs such as `textShadowOffset`.
    Offset { width: f64, height: f64 },
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// A flattened style object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, StyleValue>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of this style; `other` wins on conflict.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in &other.0 {
            self.0.insert(property.clone(), value.clone());
        }
    }

    /// Return a copy of this style with `other` overlaid.
    pub fn merged(&self, other: &Style) -> Style {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|property, _| keep(property));
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (property, value) in iter {
            style.insert(property, value);
        }
        style
    }
}

/// Styles keyed by node type name, plus the list-item sub-component keys
/// (`list_item_bullet_marker`, `list_item_bullet_content`,
/// `list_item_ordered_marker`, `list_item_ordered_content`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(HashMap<String, Style>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, style: Style) -> Self {
        self.insert(key, style);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, style: Style) {
        self.0.insert(key.into(), style);
    }

    pub fn get(&self, key: &str) -> Option<&Style> {
        self.0.get(key)
    }

    /// Style for `key`, or an empty style when the map has none.
    pub fn get_or_empty(&self, key: &str) -> &Style {
        static EMPTY: Style = Style(BTreeMap::new());
        self.0.get(key).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Resolve caller overrides against the default table.
    ///
    /// With `use_defaults`, every default key gets its default style
    /// overlaid with the override for that key; override keys without a
    /// default are dropped. Without it, only the overrides are used.
    pub fn resolve(overrides: Option<&StyleMap>, use_defaults: bool) -> StyleMap {
        match (overrides, use_defaults) {
            (None, true) => default_styles(),
            (None, false) => StyleMap::new(),
            (Some(overrides), false) => overrides.clone(),
            (Some(overrides), true) => {
                let mut resolved = default_styles();
                for (key, style) in &mut resolved.0 {
                    if let Some(overlay) = overrides.get(key) {
                        style.merge(overlay);
                    }
                }
                resolved
            }
        }
    }
}
