//! Style keys, value rules and the style registry.
//!
//! This module provides the core styling primitives:
//!
//! - [`StyleKey`]: identifies one customizable property (a color or a typography setting)
//! - [`ValueRule`]: the validator attached to each key
//! - [`StyleRegistry`]: defaults, validation and the font family allow-list
//! - [`StyleMap`]: a complete, validated set of values
//! - [`StyleOverrides`]: a partial, unvalidated set of values
//!
//! Validation follows a "fail to default" policy: any value that does not
//! satisfy its key's rule is replaced with the registry default.

mod key;
mod map;
mod registry;
mod rule;

pub use key::{
    ColorKey, FontProperty, StyleFamily, StyleKey, TextElement, TypographyKey, UnknownStyleKey,
};
pub use map::{StyleMap, StyleOverrides};
pub use registry::{FontFamily, StyleRegistry, FONT_FAMILIES};
pub use rule::{ValueRule, FONT_WEIGHTS};
