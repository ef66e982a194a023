//! Style key identifiers.
//!
//! Every customizable visual property of the card is named by a [`StyleKey`].
//! Keys come in two families:
//!
//! - [`ColorKey`]: hex colors for backgrounds, text and the download button
//! - [`TypographyKey`]: a [`TextElement`] crossed with a [`FontProperty`]
//!
//! The derived ordering of [`StyleKey`] is the canonical key order: all color
//! keys first (in declaration order), then typography keys grouped by element.
//! Emitters and serializers iterate in this order so their output is stable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The two groups of style keys. Global/override switches and reset actions
/// operate on a whole family at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleFamily {
    Colors,
    Typography,
}

impl StyleFamily {
    pub const ALL: [StyleFamily; 2] = [StyleFamily::Colors, StyleFamily::Typography];

    /// Returns the lowercase family name used in form fields and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleFamily::Colors => "colors",
            StyleFamily::Typography => "typography",
        }
    }

    /// Iterates over the keys of this family in canonical order.
    pub fn keys(self) -> impl Iterator<Item = StyleKey> {
        StyleKey::all()
            .iter()
            .copied()
            .filter(move |key| key.family() == self)
    }
}

impl fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color property of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorKey {
    Background,
    TypeBadgeBg,
    FooterBg,
    DocIcon,
    Title,
    TypeBadgeText,
    Size,
    DownloadText,
    DownloadBtn,
    DownloadBtnHover,
}

impl ColorKey {
    pub const ALL: [ColorKey; 10] = [
        ColorKey::Background,
        ColorKey::TypeBadgeBg,
        ColorKey::FooterBg,
        ColorKey::DocIcon,
        ColorKey::Title,
        ColorKey::TypeBadgeText,
        ColorKey::Size,
        ColorKey::DownloadText,
        ColorKey::DownloadBtn,
        ColorKey::DownloadBtnHover,
    ];

    /// Returns the stored option name, e.g. `"title_color"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorKey::Background => "background_color",
            ColorKey::TypeBadgeBg => "type_badge_bg_color",
            ColorKey::FooterBg => "footer_bg_color",
            ColorKey::DocIcon => "doc_icon_color",
            ColorKey::Title => "title_color",
            ColorKey::TypeBadgeText => "type_badge_text_color",
            ColorKey::Size => "size_color",
            ColorKey::DownloadText => "download_text_color",
            ColorKey::DownloadBtn => "download_btn_color",
            ColorKey::DownloadBtnHover => "download_btn_hover_color",
        }
    }

    /// Human-readable field label for the settings form.
    pub fn label(self) -> &'static str {
        match self {
            ColorKey::Background => "Media Item Background Color",
            ColorKey::TypeBadgeBg => "Type Badge Background Color",
            ColorKey::FooterBg => "Footer Background Color",
            ColorKey::DocIcon => "Document Icon Color",
            ColorKey::Title => "Title Color",
            ColorKey::TypeBadgeText => "Type Badge Text Color",
            ColorKey::Size => "File Size Color",
            ColorKey::DownloadText => "Download Text Color",
            ColorKey::DownloadBtn => "Download Button Color",
            ColorKey::DownloadBtnHover => "Download Button Hover Color",
        }
    }
}

/// A text element of the card that carries its own typography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextElement {
    Title,
    TypeBadge,
    Size,
    Download,
}

impl TextElement {
    pub const ALL: [TextElement; 4] = [
        TextElement::Title,
        TextElement::TypeBadge,
        TextElement::Size,
        TextElement::Download,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextElement::Title => "title",
            TextElement::TypeBadge => "type_badge",
            TextElement::Size => "size",
            TextElement::Download => "download",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextElement::Title => "Title",
            TextElement::TypeBadge => "Type Badge",
            TextElement::Size => "File Size",
            TextElement::Download => "Download Button",
        }
    }
}

/// A font property that can be set per [`TextElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontProperty {
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
}

impl FontProperty {
    pub const ALL: [FontProperty; 4] = [
        FontProperty::FontFamily,
        FontProperty::FontSize,
        FontProperty::FontWeight,
        FontProperty::LineHeight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontProperty::FontFamily => "font_family",
            FontProperty::FontSize => "font_size",
            FontProperty::FontWeight => "font_weight",
            FontProperty::LineHeight => "line_height",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FontProperty::FontFamily => "Font Family",
            FontProperty::FontSize => "Font Size",
            FontProperty::FontWeight => "Font Weight",
            FontProperty::LineHeight => "Line Height",
        }
    }
}

// Indexed as [element][property], matching the derived ordering.
const TYPOGRAPHY_NAMES: [[&str; 4]; 4] = [
    [
        "title_font_family",
        "title_font_size",
        "title_font_weight",
        "title_line_height",
    ],
    [
        "type_badge_font_family",
        "type_badge_font_size",
        "type_badge_font_weight",
        "type_badge_line_height",
    ],
    [
        "size_font_family",
        "size_font_size",
        "size_font_weight",
        "size_line_height",
    ],
    [
        "download_font_family",
        "download_font_size",
        "download_font_weight",
        "download_line_height",
    ],
];

/// A typography property of one text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypographyKey {
    pub element: TextElement,
    pub property: FontProperty,
}

impl TypographyKey {
    pub const fn new(element: TextElement, property: FontProperty) -> Self {
        Self { element, property }
    }

    /// Returns the stored option name, e.g. `"title_font_size"`.
    pub fn as_str(self) -> &'static str {
        TYPOGRAPHY_NAMES[self.element as usize][self.property as usize]
    }
}

/// Identifier for one customizable visual property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    Color(ColorKey),
    Typography(TypographyKey),
}

static ALL_KEYS: Lazy<Vec<StyleKey>> = Lazy::new(|| {
    let colors = ColorKey::ALL.iter().copied().map(StyleKey::Color);
    let typography = TextElement::ALL.iter().flat_map(|&element| {
        FontProperty::ALL
            .iter()
            .map(move |&property| StyleKey::Typography(TypographyKey::new(element, property)))
    });
    colors.chain(typography).collect()
});

impl StyleKey {
    /// Number of keys in the registry.
    pub const COUNT: usize = ColorKey::ALL.len() + TextElement::ALL.len() * FontProperty::ALL.len();

    /// All keys in canonical order.
    pub fn all() -> &'static [StyleKey] {
        &ALL_KEYS
    }

    /// Shorthand for a typography key.
    pub const fn typography(element: TextElement, property: FontProperty) -> Self {
        StyleKey::Typography(TypographyKey::new(element, property))
    }

    /// Position of this key in the canonical order.
    pub fn index(self) -> usize {
        match self {
            StyleKey::Color(color) => color as usize,
            StyleKey::Typography(key) => {
                ColorKey::ALL.len()
                    + key.element as usize * FontProperty::ALL.len()
                    + key.property as usize
            }
        }
    }

    pub fn family(self) -> StyleFamily {
        match self {
            StyleKey::Color(_) => StyleFamily::Colors,
            StyleKey::Typography(_) => StyleFamily::Typography,
        }
    }

    /// Returns the stored option name.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKey::Color(color) => color.as_str(),
            StyleKey::Typography(key) => key.as_str(),
        }
    }

    /// Human-readable field label.
    pub fn label(self) -> String {
        match self {
            StyleKey::Color(color) => color.label().to_string(),
            StyleKey::Typography(key) => {
                format!("{} {}", key.element.label(), key.property.label())
            }
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name does not match any registered style key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style key '{0}'")]
pub struct UnknownStyleKey(pub String);

impl FromStr for StyleKey {
    type Err = UnknownStyleKey;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        StyleKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str() == name)
            .ok_or_else(|| UnknownStyleKey(name.to_string()))
    }
}

impl Serialize for StyleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StyleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
