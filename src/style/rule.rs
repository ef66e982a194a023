//! Per-key value rules.
//!
//! Each [`StyleKey`](super::StyleKey) maps to exactly one [`ValueRule`]. The
//! rule decides whether a raw string is an acceptable value; what happens to
//! rejected input (default substitution or a preview no-op) is up to the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::key::{FontProperty, StyleKey};
use super::registry::FONT_FAMILIES;

const HEX_COLOR_PATTERN: &str = r"^#(?:[0-9a-fA-F]{3}){1,2}$";
const FONT_SIZE_PATTERN: &str = r"^[0-9]+(?:px|rem|em|%)$";
const LINE_HEIGHT_PATTERN: &str = r"^[0-9]+(?:\.[0-9]+)?(?:px|em|rem)?$";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(HEX_COLOR_PATTERN).expect("hex color pattern"));

static FONT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(FONT_SIZE_PATTERN).expect("font size pattern"));

static LINE_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(LINE_HEIGHT_PATTERN).expect("line height pattern"));

/// Accepted font weights, lightest first.
pub const FONT_WEIGHTS: [&str; 9] = ["100", "200", "300", "400", "500", "600", "700", "800", "900"];

/// Validation rule for one family of style values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueRule {
    /// `#rgb` or `#rrggbb`.
    HexColor,
    /// One of the tokens in [`FONT_FAMILIES`].
    FontFamily,
    /// `100` through `900` in steps of 100.
    FontWeight,
    /// Integer with a `px`, `rem`, `em` or `%` suffix.
    FontSize,
    /// Unitless number or a number with a `px`, `em` or `rem` suffix.
    LineHeight,
}

impl ValueRule {
    /// Returns the rule that governs `key`.
    pub fn for_key(key: StyleKey) -> Self {
        match key {
            StyleKey::Color(_) => ValueRule::HexColor,
            StyleKey::Typography(key) => match key.property {
                FontProperty::FontFamily => ValueRule::FontFamily,
                FontProperty::FontSize => ValueRule::FontSize,
                FontProperty::FontWeight => ValueRule::FontWeight,
                FontProperty::LineHeight => ValueRule::LineHeight,
            },
        }
    }

    /// Returns true if `raw` is acceptable verbatim.
    pub fn check(self, raw: &str) -> bool {
        match self {
            ValueRule::HexColor => HEX_COLOR.is_match(raw),
            ValueRule::FontFamily => FONT_FAMILIES.iter().any(|family| family.token == raw),
            ValueRule::FontWeight => FONT_WEIGHTS.contains(&raw),
            ValueRule::FontSize => FONT_SIZE.is_match(raw),
            ValueRule::LineHeight => LINE_HEIGHT.is_match(raw),
        }
    }

    /// The regular expression behind a pattern rule. Rules over a closed
    /// domain return `None`.
    ///
    /// The patterns only use syntax that JavaScript's `RegExp` reads the same way.
    pub fn pattern(self) -> Option<&'static str> {
        match self {
            ValueRule::HexColor => Some(HEX_COLOR_PATTERN),
            ValueRule::FontSize => Some(FONT_SIZE_PATTERN),
            ValueRule::LineHeight => Some(LINE_HEIGHT_PATTERN),
            ValueRule::FontFamily | ValueRule::FontWeight => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueRule::HexColor => "hex_color",
            ValueRule::FontFamily => "font_family",
            ValueRule::FontWeight => "font_weight",
            ValueRule::FontSize => "font_size",
            ValueRule::LineHeight => "line_height",
        }
    }
}
