//! Attachment records and the lookup interface the card renderer uses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::util::{file_extension, format_size, mime_label};
use crate::config::CardConfig;

/// A media library entry as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: u64,
    /// Public download URL.
    pub url: String,
    pub title: String,
    /// MIME type, used for the type badge when the URL has no extension.
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

impl Attachment {
    pub fn new(id: u64, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: title.into(),
            mime_type: None,
            size_bytes: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.size_bytes = Some(bytes);
        self
    }

    /// The type badge label: the file extension, else the MIME subtype.
    pub fn type_label(&self) -> String {
        file_extension(&self.url)
            .or_else(|| self.mime_type.as_deref().and_then(mime_label))
            .unwrap_or_default()
    }
}

/// Lookup of attachments by id.
pub trait AttachmentStore {
    /// Returns the attachment with `id`, or `None` if it does not exist or
    /// is not a media library item.
    fn attachment(&self, id: u64) -> Option<Attachment>;
}

impl<T: AttachmentStore + ?Sized> AttachmentStore for &T {
    fn attachment(&self, id: u64) -> Option<Attachment> {
        (**self).attachment(id)
    }
}

/// An [`AttachmentStore`] backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryAttachments {
    items: HashMap<u64, Attachment>,
}

impl MemoryAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attachment, returning the updated store for chaining.
    pub fn with(mut self, attachment: Attachment) -> Self {
        self.insert(attachment);
        self
    }

    pub fn insert(&mut self, attachment: Attachment) {
        self.items.insert(attachment.id, attachment);
    }
}

impl AttachmentStore for MemoryAttachments {
    fn attachment(&self, id: u64) -> Option<Attachment> {
        self.items.get(&id).cloned()
    }
}

/// What a caller asks the card renderer to show.
///
/// The shortcode and the widget each build one of these from their own input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRequest {
    /// Attachment id; `0` never resolves.
    pub id: u64,
    /// Title replacing the attachment title when non-empty.
    pub title: Option<String>,
    /// Download link text; the configured default when `None` or empty.
    pub download_text: Option<String>,
}

impl CardRequest {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_download_text(mut self, text: impl Into<String>) -> Self {
        self.download_text = Some(text.into());
        self
    }
}

/// The display-ready values the card template renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardContent {
    /// Suffix for the element ids inside the card.
    pub dom_id: String,
    pub url: String,
    pub title: String,
    pub extension: String,
    pub size: String,
    pub download_text: String,
}

impl CardContent {
    /// Combines an attachment with the caller's request.
    pub fn new(attachment: &Attachment, request: &CardRequest, config: &CardConfig) -> Self {
        let title = non_empty(request.title.as_deref()).unwrap_or(&attachment.title);
        let download_text = non_empty(request.download_text.as_deref())
            .unwrap_or(&config.default_download_text);
        let size = attachment
            .size_bytes
            .map(format_size)
            .unwrap_or_else(|| config.messages.unknown_size.clone());

        Self {
            dom_id: attachment.id.to_string(),
            url: attachment.url.clone(),
            title: title.to_string(),
            extension: attachment.type_label(),
            size,
            download_text: download_text.to_string(),
        }
    }

    /// The sample card shown on the settings page.
    pub fn sample(config: &CardConfig) -> Self {
        Self {
            dom_id: "preview".to_string(),
            url: "#".to_string(),
            title: "Sample Document".to_string(),
            extension: "PDF".to_string(),
            size: format_size(2_621_440),
            download_text: config.default_download_text.clone(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
