//! The page-builder widget.
//!
//! The host passes each widget instance's saved settings as JSON.
//! [`WidgetSettings`] reads them, [`WidgetRenderer`] resolves the instance
//! styles against the global records and renders a scoped `<style>` block
//! followed by the card.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::css::Scope;
use crate::error::Result;
use crate::render::{AttachmentStore, CardRenderer, CardRequest};
use crate::resolve::{Resolver, UseGlobal};
use crate::shortcode::parse_id;
use crate::store::GlobalStyles;
use crate::style::{ColorKey, FontProperty, StyleKey, StyleOverrides, TextElement};

/// Builder control names accepted in place of the registry color names.
const COLOR_ALIASES: &[(&str, ColorKey)] = &[
    ("badge_bg_color", ColorKey::TypeBadgeBg),
    ("badge_text_color", ColorKey::TypeBadgeText),
    ("file_size_color", ColorKey::Size),
    ("download_button_color", ColorKey::DownloadBtn),
    ("download_button_hover_color", ColorKey::DownloadBtnHover),
    ("icon_color", ColorKey::DocIcon),
];

/// Typography group control prefixes, e.g. `badge_typography_font_size`.
const TYPOGRAPHY_GROUPS: &[(&str, TextElement)] = &[
    ("title_typography", TextElement::Title),
    ("badge_typography", TextElement::TypeBadge),
    ("file_size_typography", TextElement::Size),
    ("download_button_typography", TextElement::Download),
];

/// Maps a builder control name onto a style key.
///
/// Registry names are accepted as-is; legacy control names go through the
/// alias tables.
pub fn control_key(name: &str) -> Option<StyleKey> {
    if let Ok(key) = name.parse::<StyleKey>() {
        return Some(key);
    }
    if let Some((_, color)) = COLOR_ALIASES.iter().find(|(alias, _)| *alias == name) {
        return Some(StyleKey::Color(*color));
    }
    TYPOGRAPHY_GROUPS.iter().find_map(|(group, element)| {
        let property = name.strip_prefix(group)?.strip_prefix('_')?;
        FontProperty::ALL
            .into_iter()
            .find(|p| p.as_str() == property)
            .map(|p| StyleKey::typography(*element, p))
    })
}

/// The saved settings of one widget instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetSettings {
    /// Selected attachment; `0` when nothing is selected.
    #[serde(default, deserialize_with = "media_id")]
    pub media_id: u64,
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub download_text: Option<String>,
    #[serde(default = "switch_on", deserialize_with = "switch")]
    pub use_global_colors: bool,
    #[serde(default = "switch_on", deserialize_with = "switch")]
    pub use_global_typography: bool,
    /// Every other control, keyed by control name.
    #[serde(flatten)]
    pub controls: BTreeMap<String, Value>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            media_id: 0,
            custom_title: None,
            download_text: None,
            use_global_colors: true,
            use_global_typography: true,
            controls: BTreeMap::new(),
        }
    }
}

impl WidgetSettings {
    pub fn use_global(&self) -> UseGlobal {
        UseGlobal::new(self.use_global_colors, self.use_global_typography)
    }

    /// The instance overrides carried by the style controls.
    ///
    /// When a control is present under both its registry name and an alias,
    /// the registry name wins.
    pub fn overrides(&self) -> StyleOverrides {
        let mut aliased = StyleOverrides::new();
        let mut named = StyleOverrides::new();
        for (name, value) in &self.controls {
            let Some(key) = control_key(name) else {
                tracing::trace!("Ignoring widget control '{}'", name);
                continue;
            };
            let target = if key.as_str() == name {
                &mut named
            } else {
                &mut aliased
            };
            target.insert(key, control_text(value));
        }
        aliased.extend(&named);
        aliased
    }

    /// The card request for this instance.
    pub fn request(&self) -> CardRequest {
        CardRequest {
            id: self.media_id,
            title: self.custom_title.clone(),
            download_text: self.download_text.clone(),
        }
    }
}

/// Text of a control value. Slider controls (`{ "size": 18, "unit": "px" }`)
/// become `"18px"`; an empty slider is unset.
fn control_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Object(slider) if slider.contains_key("size") => {
            let size = match &slider["size"] {
                Value::String(size) => size.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            if size.is_empty() {
                return String::new();
            }
            let unit = slider.get("unit").and_then(Value::as_str).unwrap_or_default();
            format!("{}{}", size, unit)
        }
        other => other.to_string(),
    }
}

fn switch_on() -> bool {
    true
}

fn switch<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(on) => on,
        Value::String(text) => text == "yes",
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        _ => false,
    })
}

fn media_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    Ok(id_value(&Value::deserialize(deserializer)?))
}

fn id_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(text) => parse_id(text),
        Value::Object(media) => media.get("id").map(id_value).unwrap_or(0),
        _ => 0,
    }
}

/// Renders widget instances.
///
/// # Example
///
/// ```rust
/// use mediacard::widget::{WidgetRenderer, WidgetSettings};
/// use mediacard::{Attachment, CardConfig, CardRenderer, GlobalStyles, MemoryAttachments};
///
/// let renderer = CardRenderer::new(CardConfig::default()).unwrap();
/// let attachments = MemoryAttachments::new()
///     .with(Attachment::new(9, "https://x.test/a.pdf", "Brochure"));
/// let globals = GlobalStyles::new();
///
/// let settings: WidgetSettings = serde_json::from_str(r##"{
///     "media_id": { "id": 9, "url": "https://x.test/a.pdf" },
///     "use_global_colors": "",
///     "title_color": "#ff0000"
/// }"##).unwrap();
///
/// let html = WidgetRenderer::new(&renderer, &attachments, &globals)
///     .render("4f2a", &settings)
///     .unwrap();
/// assert!(html.contains(".elementor-element-4f2a .media-item__title { color: #ff0000;"));
/// assert!(html.contains(">Brochure</h2>"));
/// ```
#[derive(Debug)]
pub struct WidgetRenderer<'a, A: AttachmentStore + ?Sized> {
    resolver: Resolver<'a>,
    renderer: &'a CardRenderer,
    attachments: &'a A,
    globals: &'a GlobalStyles,
}

impl<'a, A: AttachmentStore + ?Sized> WidgetRenderer<'a, A> {
    pub fn new(renderer: &'a CardRenderer, attachments: &'a A, globals: &'a GlobalStyles) -> Self {
        Self {
            resolver: Resolver::standard(),
            renderer,
            attachments,
            globals,
        }
    }

    /// Uses `resolver` instead of the built-in registry.
    pub fn with_resolver(mut self, resolver: Resolver<'a>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Renders one instance.
    ///
    /// Without a selected media file only the "no media" message is shown.
    pub fn render(&self, instance_id: &str, settings: &WidgetSettings) -> Result<String> {
        let config = self.renderer.config();
        if settings.media_id == 0 {
            return self.renderer.render_error(&config.messages.no_media);
        }

        let styles = self.resolver.resolve_instance(
            self.globals,
            &settings.overrides(),
            settings.use_global(),
        );
        let scope = Scope::instance(&config.instance_class_prefix, instance_id);
        self.renderer
            .render_styled(self.attachments, &settings.request(), &styles, &scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardConfig;
    use crate::render::{Attachment, MemoryAttachments};
    use crate::style::StyleFamily;
    use serde_json::json;

    fn settings(value: Value) -> WidgetSettings {
        serde_json::from_value(value).unwrap()
    }

    // =========================================================================
    // Settings parsing
    // =========================================================================

    #[test]
    fn test_defaults() {
        let s = settings(json!({}));
        assert_eq!(s, WidgetSettings::default());
        assert_eq!(s.use_global(), UseGlobal::new(true, true));
    }

    #[test]
    fn test_media_id_forms() {
        assert_eq!(settings(json!({ "media_id": 5 })).media_id, 5);
        assert_eq!(settings(json!({ "media_id": "12" })).media_id, 12);
        assert_eq!(settings(json!({ "media_id": { "id": 7, "url": "" } })).media_id, 7);
        assert_eq!(settings(json!({ "media_id": { "id": "" } })).media_id, 0);
        assert_eq!(settings(json!({ "media_id": null })).media_id, 0);
    }

    #[test]
    fn test_switch_forms() {
        let s = settings(json!({ "use_global_colors": "", "use_global_typography": "yes" }));
        assert_eq!(s.use_global(), UseGlobal::new(false, true));

        let s = settings(json!({ "use_global_colors": true, "use_global_typography": false }));
        assert_eq!(s.use_global(), UseGlobal::new(true, false));
    }

    // =========================================================================
    // Control names
    // =========================================================================

    #[test]
    fn test_control_key_aliases() {
        assert_eq!(control_key("title_color"), Some(StyleKey::Color(ColorKey::Title)));
        assert_eq!(control_key("badge_bg_color"), Some(StyleKey::Color(ColorKey::TypeBadgeBg)));
        assert_eq!(control_key("icon_color"), Some(StyleKey::Color(ColorKey::DocIcon)));
        assert_eq!(
            control_key("badge_typography_font_size"),
            Some(StyleKey::typography(TextElement::TypeBadge, FontProperty::FontSize))
        );
        assert_eq!(
            control_key("download_button_typography_line_height"),
            Some(StyleKey::typography(TextElement::Download, FontProperty::LineHeight))
        );
        assert_eq!(control_key("badge_typography_letter_spacing"), None);
        assert_eq!(control_key("_margin"), None);
    }

    #[test]
    fn test_overrides_from_controls() {
        let s = settings(json!({
            "file_size_color": "#123456",
            "title_typography_font_size": { "unit": "px", "size": 18, "sizes": [] },
            "title_typography_line_height": { "unit": "em", "size": "" },
            "title_font_weight": 700,
            "custom_css": "ignored",
        }));
        let overrides = s.overrides();

        assert_eq!(overrides.get(StyleKey::Color(ColorKey::Size)), Some("#123456"));
        assert_eq!(
            overrides.get(StyleKey::typography(TextElement::Title, FontProperty::FontSize)),
            Some("18px")
        );
        assert_eq!(
            overrides.get(StyleKey::typography(TextElement::Title, FontProperty::LineHeight)),
            None
        );
        assert_eq!(
            overrides.get(StyleKey::typography(TextElement::Title, FontProperty::FontWeight)),
            Some("700")
        );
    }

    #[test]
    fn test_registry_name_beats_alias() {
        let s = settings(json!({ "size_color": "#000000", "file_size_color": "#ffffff" }));
        assert_eq!(s.overrides().get(StyleKey::Color(ColorKey::Size)), Some("#000000"));
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn fixtures() -> (CardRenderer, MemoryAttachments) {
        let renderer = CardRenderer::new(CardConfig::default()).unwrap();
        let attachments = MemoryAttachments::new()
            .with(Attachment::new(9, "https://x.test/a.pdf", "Brochure").with_size(512));
        (renderer, attachments)
    }

    #[test]
    fn test_render_without_media() {
        let (renderer, attachments) = fixtures();
        let globals = GlobalStyles::new();
        let html = WidgetRenderer::new(&renderer, &attachments, &globals)
            .render("x1", &WidgetSettings::default())
            .unwrap();
        assert_eq!(html, r#"<div class="media-item__error">Please select a media file.</div>"#);
    }

    #[test]
    fn test_render_global_switch_ignores_instance() {
        let (renderer, attachments) = fixtures();
        let globals = GlobalStyles::from_records(
            Some(StyleOverrides::new().with(StyleKey::Color(ColorKey::Title), "#111111")),
            None,
        );
        let s = settings(json!({ "media_id": 9, "title_color": "#222222" }));

        let html = WidgetRenderer::new(&renderer, &attachments, &globals)
            .render("x1", &s)
            .unwrap();
        assert!(html.starts_with("<style type=\"text/css\">\n.elementor-element-x1 .media-item {"));
        assert!(html.contains(".elementor-element-x1 .media-item__title { color: #111111;"));
        assert!(html.contains(">Brochure</h2>"));
    }

    #[test]
    fn test_render_families_switch_independently() {
        let (renderer, attachments) = fixtures();
        let globals = GlobalStyles::new();
        let s = settings(json!({
            "media_id": 9,
            "use_global_colors": "",
            "use_global_typography": "yes",
            "title_color": "#222222",
            "title_font_size": "40px",
        }));

        let html = WidgetRenderer::new(&renderer, &attachments, &globals)
            .render("x1", &s)
            .unwrap();
        assert!(html.contains(".media-item__title { color: #222222; font-family: inherit; font-size: 24px;"));
    }

    #[test]
    fn test_render_invalid_instance_value_uses_default() {
        let (renderer, attachments) = fixtures();
        let globals = GlobalStyles::from_records(
            Some(StyleOverrides::new().with(StyleKey::Color(ColorKey::Title), "#111111")),
            None,
        );
        let s = settings(json!({ "media_id": 9, "use_global_colors": "", "title_color": "red" }));

        let resolver = Resolver::standard();
        let map = resolver.resolve_instance(&globals, &s.overrides(), s.use_global());
        assert_eq!(map.get(StyleKey::Color(ColorKey::Title)), "#1a202c");
        assert_eq!(map.family(StyleFamily::Colors).count(), 10);

        let html = WidgetRenderer::new(&renderer, &attachments, &globals)
            .with_resolver(resolver)
            .render("x1", &s)
            .unwrap();
        assert!(html.contains(".media-item__title { color: #1a202c;"));
    }
}
