//! The `[cg_media_library_item]` shortcode.
//!
//! Post content may embed cards with
//!
//! ```text
//! [cg_media_library_item id="42" title="Annual Report" download-title="Get PDF"]
//! ```
//!
//! Attribute values may be double-quoted, single-quoted or bare. Attribute
//! names are case-insensitive. A doubled bracket (`[[cg_media_library_item]]`)
//! escapes the shortcode and is printed literally without the outer brackets.
//!
//! ```rust
//! use mediacard::shortcode::{expand_shortcodes, has_shortcode};
//! use mediacard::{Attachment, CardConfig, CardRenderer, MemoryAttachments};
//!
//! let renderer = CardRenderer::new(CardConfig::default()).unwrap();
//! let attachments = MemoryAttachments::new()
//!     .with(Attachment::new(42, "https://x.test/report.pdf", "Report"));
//!
//! let content = r#"<p>Read this:</p>[cg_media_library_item id="42"]"#;
//! assert!(has_shortcode(content));
//!
//! let html = expand_shortcodes(content, &renderer, &attachments).unwrap();
//! assert!(html.starts_with("<p>Read this:</p><div class=\"media-item\""));
//! ```

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::css::{emit, style_block, Scope};
use crate::error::Result;
use crate::render::{AttachmentStore, CardRenderer, CardRequest};
use crate::style::StyleMap;

/// The shortcode tag.
pub const SHORTCODE_TAG: &str = "cg_media_library_item";

static SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"\[(\[?){}(?:\s+([^\]]*?))?\s*/?\](\]?)", SHORTCODE_TAG);
    Regex::new(&pattern).expect("shortcode pattern is valid")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s'"]+))"#)
        .expect("attribute pattern is valid")
});

/// The attributes of one shortcode occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortcode {
    /// Attachment id. Missing or non-numeric ids parse as `0`.
    pub id: u64,
    pub title: Option<String>,
    pub download_title: Option<String>,
}

impl Shortcode {
    /// Parses the attribute text between the tag name and the closing bracket.
    ///
    /// Unknown attributes are ignored. When an attribute repeats, the last
    /// occurrence wins.
    pub fn parse(attributes: &str) -> Self {
        let mut shortcode = Self::default();
        for caps in ATTRIBUTE.captures_iter(attributes) {
            let value = [2, 3, 4]
                .into_iter()
                .find_map(|i| caps.get(i))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match caps[1].to_ascii_lowercase().as_str() {
                "id" => shortcode.id = parse_id(value),
                "title" => shortcode.title = Some(value.to_string()),
                "download-title" => shortcode.download_title = Some(value.to_string()),
                other => tracing::debug!("Ignoring shortcode attribute '{}'", other),
            }
        }
        shortcode
    }

    /// The card request for this occurrence.
    pub fn request(&self) -> CardRequest {
        CardRequest {
            id: self.id,
            title: self.title.clone(),
            download_text: self.download_title.clone(),
        }
    }
}

/// Reads an integer prefix the way form input is usually coerced: leading
/// whitespace and digits count, anything else stops the number.
///
/// Negative, empty and overflowing values become `0`.
pub(crate) fn parse_id(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(0)
}

fn is_escaped(caps: &Captures<'_>) -> bool {
    let open = caps.get(1).map_or(false, |m| !m.is_empty());
    let close = caps.get(3).map_or(false, |m| !m.is_empty());
    open && close
}

/// Byte range of an unescaped occurrence. A lone `[` or `]` around the tag
/// is not part of it.
fn occurrence(caps: &Captures<'_>) -> Option<Range<usize>> {
    let whole = caps.get(0)?;
    let start = whole.start() + caps.get(1).map_or(0, |m| m.len());
    let end = caps.get(3).map_or(whole.end(), |m| m.start());
    Some(start..end)
}

/// Every unescaped shortcode in `content`, with its byte range.
pub fn find_shortcodes(content: &str) -> Vec<(Range<usize>, Shortcode)> {
    SHORTCODE
        .captures_iter(content)
        .filter(|caps| !is_escaped(caps))
        .filter_map(|caps| {
            let range = occurrence(&caps)?;
            let attributes = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            Some((range, Shortcode::parse(attributes)))
        })
        .collect()
}

/// Whether `content` contains at least one unescaped shortcode.
pub fn has_shortcode(content: &str) -> bool {
    SHORTCODE.captures_iter(content).any(|caps| !is_escaped(&caps))
}

/// Replaces every shortcode in `content` with its rendered card.
///
/// # Errors
///
/// Returns an error if a template fails to render.
pub fn expand_shortcodes<A: AttachmentStore + ?Sized>(
    content: &str,
    renderer: &CardRenderer,
    attachments: &A,
) -> Result<String> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for caps in SHORTCODE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };

        if is_escaped(&caps) {
            out.push_str(&content[last..whole.start()]);
            out.push_str(&whole.as_str()[1..whole.len() - 1]);
            last = whole.end();
        } else {
            let range = occurrence(&caps).unwrap_or(whole.range());
            out.push_str(&content[last..range.start]);
            let attributes = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let request = Shortcode::parse(attributes).request();
            out.push_str(&renderer.render_request(attachments, &request)?);
            last = range.end;
        }
    }
    out.push_str(&content[last..]);
    Ok(out)
}

/// The page-level `<style>` block with the global card styles.
///
/// Returns `None` when the page neither embeds the shortcode nor runs a page
/// builder that may place widgets.
pub fn head_styles(content: &str, page_builder_active: bool, styles: &StyleMap) -> Option<String> {
    if !page_builder_active && !has_shortcode(content) {
        return None;
    }
    Some(style_block(&emit(styles, &Scope::global())))
}
