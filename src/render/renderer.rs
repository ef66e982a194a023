//! Pre-compiled card renderer.

use std::path::Path;

use minijinja::{context, path_loader, Environment};
use serde::Serialize;

use super::attachment::{AttachmentStore, CardContent, CardRequest};
use super::filters::register_filters;
use crate::config::CardConfig;
use crate::css::{emit, style_block, Scope};
use crate::error::Result;
use crate::style::StyleMap;

/// Name of the card template.
pub const CARD_TEMPLATE: &str = "card.html";
/// Name of the template shown for an invalid attachment.
pub const ERROR_TEMPLATE: &str = "card_error.html";
/// Name of the settings page template.
pub const SETTINGS_TEMPLATE: &str = "settings.html";

fn builtin(name: &str) -> Option<&'static str> {
    match name {
        CARD_TEMPLATE => Some(include_str!("../templates/card.html")),
        ERROR_TEMPLATE => Some(include_str!("../templates/card_error.html")),
        SETTINGS_TEMPLATE => Some(include_str!("../templates/settings.html")),
        _ => None,
    }
}

/// Renders card markup from attachments.
///
/// Templates are compiled once and reused. All templates use HTML
/// auto-escaping, so titles and other attachment text can be passed as-is.
///
/// # Example
///
/// ```rust
/// use mediacard::{Attachment, CardConfig, CardRenderer, CardRequest, MemoryAttachments};
///
/// let renderer = CardRenderer::new(CardConfig::default()).unwrap();
/// let attachments = MemoryAttachments::new()
///     .with(Attachment::new(42, "https://x.test/report.pdf", "Report").with_size(2_621_440));
///
/// let html = renderer.render_request(&attachments, &CardRequest::new(42)).unwrap();
/// assert!(html.contains(r#"<h2 class="media-item__title" id="file-title-42">Report</h2>"#));
/// assert!(html.contains("2.5 MB"));
/// ```
#[derive(Debug)]
pub struct CardRenderer {
    env: Environment<'static>,
    config: CardConfig,
}

impl CardRenderer {
    /// Creates a renderer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new(config: CardConfig) -> Result<Self> {
        let mut env = Environment::new();
        register_filters(&mut env);
        for name in [CARD_TEMPLATE, ERROR_TEMPLATE, SETTINGS_TEMPLATE] {
            if let Some(source) = builtin(name) {
                env.add_template(name, source)?;
            }
        }
        Ok(Self { env, config })
    }

    /// Creates a renderer that looks templates up in `dir` first.
    ///
    /// A template missing from `dir` falls back to the built-in one, so a
    /// theme can override `card.html` alone. Templates are loaded on first use.
    pub fn with_template_dir(config: CardConfig, dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        let load_from_dir = path_loader(dir);
        env.set_loader(move |name| match load_from_dir(name)? {
            Some(source) => Ok(Some(source)),
            None => Ok(builtin(name).map(str::to_string)),
        });
        Self { env, config }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Renders a named template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(data)?)
    }

    /// Renders the card for already-resolved content.
    pub fn render_card(&self, card: &CardContent) -> Result<String> {
        self.render(CARD_TEMPLATE, &context! { card })
    }

    /// Renders the inline error fragment.
    pub fn render_error(&self, message: &str) -> Result<String> {
        self.render(ERROR_TEMPLATE, &context! { message })
    }

    /// Looks up the requested attachment and renders its card.
    ///
    /// An id of `0` or an id with no attachment renders the invalid item
    /// message instead.
    pub fn render_request<A: AttachmentStore + ?Sized>(
        &self,
        attachments: &A,
        request: &CardRequest,
    ) -> Result<String> {
        let attachment = match request.id {
            0 => None,
            id => attachments.attachment(id),
        };
        match attachment {
            Some(attachment) => {
                let card = CardContent::new(&attachment, request, &self.config);
                self.render_card(&card)
            }
            None => {
                tracing::debug!("No media item with id {}", request.id);
                self.render_error(&self.config.messages.invalid_item)
            }
        }
    }

    /// Renders the requested card preceded by a `<style>` block carrying
    /// `styles` under `scope`.
    pub fn render_styled<A: AttachmentStore + ?Sized>(
        &self,
        attachments: &A,
        request: &CardRequest,
        styles: &StyleMap,
        scope: &Scope,
    ) -> Result<String> {
        let mut html = style_block(&emit(styles, scope));
        html.push_str(&self.render_request(attachments, request)?);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::render::{Attachment, MemoryAttachments};

    fn attachments() -> MemoryAttachments {
        MemoryAttachments::new().with(
            Attachment::new(12, "https://x.test/uploads/guide.docx", "User <Guide>")
                .with_size(1_048_576),
        )
    }

    fn renderer() -> CardRenderer {
        CardRenderer::new(CardConfig::default()).unwrap()
    }

    // =========================================================================
    // Card markup
    // =========================================================================

    #[test]
    fn test_card_markup() {
        let html = renderer()
            .render_request(&attachments(), &CardRequest::new(12))
            .unwrap();

        assert!(html.starts_with(r#"<div class="media-item" role="region""#));
        assert!(html.contains(r#"id="file-type-12">DOCX</div>"#));
        assert!(html.contains(r#"id="file-size-12">1 MB</div>"#));
        assert!(html.contains(r#"href="https://x.test/uploads/guide.docx""#));
        assert!(html.contains(r#"aria-labelledby="file-title-12 file-type-12 file-size-12""#));
        assert!(html.contains(r#"aria-describedby="download-desc-12""#));
        assert!(html.contains(r#"<span class="media-item__download-text">Download</span>"#));
    }

    #[test]
    fn test_card_escapes_text() {
        let html = renderer()
            .render_request(&attachments(), &CardRequest::new(12))
            .unwrap();
        assert!(html.contains("User &lt;Guide&gt;"));
        assert!(!html.contains("User <Guide>"));
    }

    #[test]
    fn test_screen_reader_description() {
        let request = CardRequest::new(12).with_download_text("Get");
        let html = renderer().render_request(&attachments(), &request).unwrap();
        assert!(html.contains("Get User &lt;Guide&gt; DOCX file (1 MB)</span>"));
    }

    #[test]
    fn test_unsafe_url_is_dropped() {
        let attachments = MemoryAttachments::new()
            .with(Attachment::new(3, "javascript:alert(1)", "Bad"));
        let html = renderer()
            .render_request(&attachments, &CardRequest::new(3))
            .unwrap();
        assert!(html.contains(r#"href="""#));
    }

    // =========================================================================
    // Invalid items
    // =========================================================================

    #[test]
    fn test_missing_attachment_renders_error() {
        let html = renderer()
            .render_request(&attachments(), &CardRequest::new(99))
            .unwrap();
        assert_eq!(html, r#"<div class="media-item__error">Invalid media item ID.</div>"#);
    }

    #[test]
    fn test_zero_id_renders_error() {
        let html = renderer()
            .render_request(&attachments(), &CardRequest::new(0))
            .unwrap();
        assert!(html.contains("media-item__error"));
    }

    #[test]
    fn test_unknown_template_error() {
        let result = renderer().render("missing.html", &());
        assert!(matches!(result, Err(Error::Template(_))));
    }

    #[test]
    fn test_render_styled() {
        let styles = crate::style::StyleRegistry::standard().defaults();
        let html = renderer()
            .render_styled(
                &attachments(),
                &CardRequest::new(12),
                &styles,
                &Scope::instance("elementor-element-", "w1"),
            )
            .unwrap();
        assert!(html.starts_with("<style type=\"text/css\">\n.elementor-element-w1 .media-item {"));
        assert!(html.contains("</style>\n<div class=\"media-item\""));
    }

    // =========================================================================
    // Template overrides
    // =========================================================================

    #[test]
    fn test_template_dir_overrides_card() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("card.html"), "<p>{{ card.title }}</p>").unwrap();

        let renderer = CardRenderer::with_template_dir(CardConfig::default(), dir.path());
        let html = renderer
            .render_request(&attachments(), &CardRequest::new(12))
            .unwrap();
        assert_eq!(html, "<p>User &lt;Guide&gt;</p>");

        let error = renderer
            .render_request(&attachments(), &CardRequest::new(1))
            .unwrap();
        assert!(error.contains("media-item__error"));
    }
}
