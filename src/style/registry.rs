//! The style registry: defaults and validation for every style key.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::key::{ColorKey, FontProperty, StyleKey, TextElement};
use super::map::StyleMap;
use super::rule::{ValueRule, FONT_WEIGHTS};

/// An entry of the font family allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontFamily {
    /// The CSS value written into `font-family`.
    pub token: &'static str,
    /// The name shown in selection controls.
    pub label: &'static str,
}

/// Font families accepted for every `*_font_family` key.
///
/// Both the validator and the settings form read this list.
pub const FONT_FAMILIES: &[FontFamily] = &[
    FontFamily {
        token: "inherit",
        label: "Inherit from theme",
    },
    FontFamily {
        token: "Arial, Helvetica, sans-serif",
        label: "Arial",
    },
    FontFamily {
        token: "\"Helvetica Neue\", Helvetica, Arial, sans-serif",
        label: "Helvetica Neue",
    },
    FontFamily {
        token: "Georgia, serif",
        label: "Georgia",
    },
    FontFamily {
        token: "\"Times New Roman\", Times, serif",
        label: "Times New Roman",
    },
    FontFamily {
        token: "Verdana, Geneva, sans-serif",
        label: "Verdana",
    },
    FontFamily {
        token: "Tahoma, Geneva, sans-serif",
        label: "Tahoma",
    },
    FontFamily {
        token: "\"Trebuchet MS\", sans-serif",
        label: "Trebuchet MS",
    },
    FontFamily {
        token: "\"Courier New\", Courier, monospace",
        label: "Courier New",
    },
    FontFamily {
        token: "system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif",
        label: "System UI",
    },
];

fn standard_default(key: StyleKey) -> &'static str {
    match key {
        StyleKey::Color(color) => match color {
            ColorKey::Background => "#f9f9f9",
            ColorKey::TypeBadgeBg => "#e2e8f0",
            ColorKey::FooterBg => "#2d3748",
            ColorKey::DocIcon => "#1a202c",
            ColorKey::Title => "#1a202c",
            ColorKey::TypeBadgeText => "#2d3748",
            ColorKey::Size => "#ffffff",
            ColorKey::DownloadText => "#ffffff",
            ColorKey::DownloadBtn => "#ffffff",
            ColorKey::DownloadBtnHover => "#ffffff",
        },
        StyleKey::Typography(key) => match (key.element, key.property) {
            (_, FontProperty::FontFamily) => "inherit",
            (TextElement::Title, FontProperty::FontSize) => "24px",
            (TextElement::TypeBadge, FontProperty::FontSize) => "14px",
            (TextElement::Size | TextElement::Download, FontProperty::FontSize) => "16px",
            (TextElement::TypeBadge, FontProperty::FontWeight) => "600",
            (_, FontProperty::FontWeight) => "500",
            (TextElement::Title | TextElement::TypeBadge, FontProperty::LineHeight) => "1.2",
            (TextElement::Size | TextElement::Download, FontProperty::LineHeight) => "1.4",
        },
    }
}

static STANDARD: Lazy<StyleRegistry> = Lazy::new(StyleRegistry::new);

/// Defaults and validators for every [`StyleKey`].
///
/// Validation never fails: input that does not satisfy the key's
/// [`ValueRule`] is replaced by the key's default.
///
/// # Example
///
/// ```rust
/// use mediacard::{ColorKey, StyleKey, StyleRegistry};
///
/// let registry = StyleRegistry::standard();
/// let title = StyleKey::Color(ColorKey::Title);
///
/// assert_eq!(registry.validate(title, "#222222"), "#222222");
/// assert_eq!(registry.validate(title, "not a color"), "#1a202c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    defaults: Vec<String>,
}

impl StyleRegistry {
    /// Creates a registry with the built-in defaults.
    pub fn new() -> Self {
        Self {
            defaults: StyleKey::all()
                .iter()
                .map(|&key| standard_default(key).to_string())
                .collect(),
        }
    }

    /// Returns the shared registry with the built-in defaults.
    pub fn standard() -> &'static StyleRegistry {
        &STANDARD
    }

    /// Replaces the default of `key`, returning the updated registry for chaining.
    ///
    /// A replacement that fails the key's rule is ignored, so defaults
    /// always satisfy their own validators.
    pub fn with_default(mut self, key: StyleKey, value: &str) -> Self {
        if ValueRule::for_key(key).check(value) {
            self.defaults[key.index()] = value.to_string();
        } else {
            tracing::warn!("Ignoring invalid default '{}' for '{}'", value, key);
        }
        self
    }

    /// The default value of a single key.
    pub fn default_value(&self, key: StyleKey) -> &str {
        &self.defaults[key.index()]
    }

    /// The complete default style map.
    pub fn defaults(&self) -> StyleMap {
        StyleMap::from_values(self.defaults.clone())
    }

    /// Returns true if `raw` is acceptable for `key` as-is.
    pub fn check(&self, key: StyleKey, raw: &str) -> bool {
        ValueRule::for_key(key).check(raw)
    }

    /// Returns `raw` if it is valid for `key`, otherwise the key's default.
    pub fn validate(&self, key: StyleKey, raw: &str) -> String {
        if self.check(key, raw) {
            raw.to_string()
        } else {
            tracing::debug!("Invalid value '{}' for '{}', using default", raw, key);
            self.default_value(key).to_string()
        }
    }

    /// The font family allow-list in display order.
    pub fn font_families(&self) -> &'static [FontFamily] {
        FONT_FAMILIES
    }

    /// The accepted font weights in ascending order.
    pub fn font_weights(&self) -> &'static [&'static str] {
        &FONT_WEIGHTS
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_size() -> StyleKey {
        StyleKey::typography(TextElement::Title, FontProperty::FontSize)
    }

    #[test]
    fn test_defaults_are_total_and_stable() {
        let registry = StyleRegistry::new();
        let a = registry.defaults();
        let b = registry.defaults();
        assert_eq!(a, b);
        assert_eq!(a.iter().count(), StyleKey::COUNT);
    }

    #[test]
    fn test_every_default_passes_its_rule() {
        let registry = StyleRegistry::new();
        for &key in StyleKey::all() {
            let value = registry.default_value(key);
            assert!(registry.check(key, value), "{key} = {value}");
        }
    }

    #[test]
    fn test_known_defaults() {
        let registry = StyleRegistry::standard();
        assert_eq!(
            registry.default_value(StyleKey::Color(ColorKey::FooterBg)),
            "#2d3748"
        );
        assert_eq!(registry.default_value(title_size()), "24px");
        assert_eq!(
            registry.default_value(StyleKey::typography(
                TextElement::TypeBadge,
                FontProperty::FontWeight
            )),
            "600"
        );
        assert_eq!(
            registry.default_value(StyleKey::typography(
                TextElement::Download,
                FontProperty::LineHeight
            )),
            "1.4"
        );
    }

    #[test]
    fn test_validate_falls_back_to_default() {
        let registry = StyleRegistry::new();
        let size = StyleKey::typography(TextElement::Size, FontProperty::FontSize);
        assert_eq!(registry.validate(size, "18"), "16px");
        assert_eq!(registry.validate(size, "18px"), "18px");
    }

    #[test]
    fn test_with_default_accepts_valid_value() {
        let registry = StyleRegistry::new().with_default(title_size(), "30px");
        assert_eq!(registry.default_value(title_size()), "30px");
        assert_eq!(registry.validate(title_size(), "huge"), "30px");
    }

    #[test]
    fn test_with_default_ignores_invalid_value() {
        let registry = StyleRegistry::new().with_default(title_size(), "30");
        assert_eq!(registry.default_value(title_size()), "24px");
    }

    #[test]
    fn test_font_family_allow_list() {
        let registry = StyleRegistry::standard();
        let families = registry.font_families();
        assert_eq!(families[0].token, "inherit");
        for family in families {
            assert!(registry.check(
                StyleKey::typography(TextElement::Title, FontProperty::FontFamily),
                family.token
            ));
        }
    }
}
