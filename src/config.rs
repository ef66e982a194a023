//! Host-facing configuration.
//!
//! [`CardConfig`] collects the names and strings that differ between hosts:
//! where the style records are stored, how instance and preview selectors are
//! built, and the (possibly localized) messages shown in place of a card.
//! Every field has a default, so a host only supplies what it changes.
//!
//! ```rust
//! use mediacard::CardConfig;
//!
//! let config: CardConfig = serde_json::from_str(r#"{
//!     "default_download_text": "Herunterladen",
//!     "messages": { "invalid_item": "Ungültige Mediendatei." }
//! }"#).unwrap();
//!
//! assert_eq!(config.messages.invalid_item, "Ungültige Mediendatei.");
//! assert_eq!(config.messages.unknown_size, "Unknown");
//! assert_eq!(config.colors_record, "cg_media_library_item_colors");
//! ```

use serde::{Deserialize, Serialize};

use crate::style::StyleFamily;

/// Strings rendered in place of card content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Shown when the attachment id is missing or does not resolve.
    pub invalid_item: String,
    /// Shown by the widget when no media file has been selected.
    pub no_media: String,
    /// Shown as the size when the attachment has no size metadata.
    pub unknown_size: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_item: "Invalid media item ID.".to_string(),
            no_media: "Please select a media file.".to_string(),
            unknown_size: "Unknown".to_string(),
        }
    }
}

/// Configuration shared by the card renderer, the widget and the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Storage key of the colors record.
    pub colors_record: String,
    /// Storage key of the typography record.
    pub typography_record: String,
    /// Class prefix identifying a page-builder widget instance.
    pub instance_class_prefix: String,
    /// Element id wrapping the settings page preview card.
    pub preview_root_id: String,
    /// Element id of the stylesheet fragment holding preview hover rules.
    pub hover_style_id: String,
    /// Download link text used when the caller supplies none.
    pub default_download_text: String,
    pub messages: Messages,
}

impl CardConfig {
    /// Storage key of the record holding `family`.
    pub fn record_name(&self, family: StyleFamily) -> &str {
        match family {
            StyleFamily::Colors => &self.colors_record,
            StyleFamily::Typography => &self.typography_record,
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            colors_record: "cg_media_library_item_colors".to_string(),
            typography_record: "cg_media_library_item_typography".to_string(),
            instance_class_prefix: "elementor-element-".to_string(),
            preview_root_id: "cg-media-item-preview".to_string(),
            hover_style_id: "cg-hover-style".to_string(),
            default_download_text: "Download".to_string(),
            messages: Messages::default(),
        }
    }
}
