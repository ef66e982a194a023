//! The selector binding table.
//!
//! Each style key is bound to the card element it styles and the CSS property
//! it sets. The emitter and the live preview both read this table, so a key
//! renders the same way on the page and in the preview.

use serde::Serialize;

use super::Scope;
use crate::style::{ColorKey, FontProperty, StyleKey, TextElement};

/// Interaction states that share one declaration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudoState {
    Hover,
    Focus,
}

impl PseudoState {
    pub fn as_str(self) -> &'static str {
        match self {
            PseudoState::Hover => "hover",
            PseudoState::Focus => "focus",
        }
    }
}

const INTERACTIVE: &[PseudoState] = &[PseudoState::Hover, PseudoState::Focus];

/// Where a style key is applied: an element selector and the CSS properties
/// it sets, optionally restricted to interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectorBinding {
    pub selector: &'static str,
    pub properties: &'static [&'static str],
    pub states: &'static [PseudoState],
}

impl SelectorBinding {
    const fn plain(selector: &'static str, properties: &'static [&'static str]) -> Self {
        Self {
            selector,
            properties,
            states: &[],
        }
    }

    const fn interactive(selector: &'static str, properties: &'static [&'static str]) -> Self {
        Self {
            selector,
            properties,
            states: INTERACTIVE,
        }
    }

    /// True if the binding only applies in interaction states.
    pub fn is_stateful(&self) -> bool {
        !self.states.is_empty()
    }

    /// The scoped selector list, e.g. `.x .btn:hover, .x .btn:focus`.
    pub fn selector_list(&self, scope: &Scope) -> String {
        if self.states.is_empty() {
            return scope.selector(self.selector);
        }
        self.states
            .iter()
            .map(|state| format!("{}:{}", scope.selector(self.selector), state.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const BACKGROUND: &[&str] = &["background-color"];
const COLOR: &[&str] = &["color"];
// The focus ring follows the hover color.
const HOVER_COLOR: &[&str] = &["color", "outline-color"];

fn element_selector(element: TextElement) -> &'static str {
    match element {
        TextElement::Title => ".media-item__title",
        TextElement::TypeBadge => ".media-item__type-badge",
        TextElement::Size => ".media-item__size",
        TextElement::Download => ".media-item__download-text",
    }
}

fn font_properties(property: FontProperty) -> &'static [&'static str] {
    match property {
        FontProperty::FontFamily => &["font-family"],
        FontProperty::FontSize => &["font-size"],
        FontProperty::FontWeight => &["font-weight"],
        FontProperty::LineHeight => &["line-height"],
    }
}

/// Returns the binding of `key`. Every key styles exactly one card element.
pub fn binding(key: StyleKey) -> SelectorBinding {
    match key {
        StyleKey::Color(color) => match color {
            ColorKey::Background => SelectorBinding::plain(".media-item", BACKGROUND),
            ColorKey::TypeBadgeBg => SelectorBinding::plain(".media-item__type-badge", BACKGROUND),
            ColorKey::FooterBg => SelectorBinding::plain(".media-item__footer", BACKGROUND),
            ColorKey::DocIcon => SelectorBinding::plain(".media-item__doc-icon", COLOR),
            ColorKey::Title => SelectorBinding::plain(".media-item__title", COLOR),
            ColorKey::TypeBadgeText => SelectorBinding::plain(".media-item__type-badge", COLOR),
            ColorKey::Size => SelectorBinding::plain(".media-item__size", COLOR),
            ColorKey::DownloadText => SelectorBinding::plain(".media-item__download-text", COLOR),
            ColorKey::DownloadBtn => SelectorBinding::plain(".media-item__download-btn", COLOR),
            ColorKey::DownloadBtnHover => {
                SelectorBinding::interactive(".media-item__download-btn", HOVER_COLOR)
            }
        },
        StyleKey::Typography(key) => SelectorBinding::plain(
            element_selector(key.element),
            font_properties(key.property),
        ),
    }
}
