//! The global settings page.
//!
//! [`SettingsPage`] renders the two-tab form with its live preview card,
//! accepts a submitted form and persists it, and produces the bootstrap
//! document a client-side script uses to drive the preview.

use std::collections::BTreeMap;

use minijinja::context;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::CardConfig;
use crate::css::{binding, emit, Scope};
use crate::error::Result;
use crate::preview::{PreviewSurface, PreviewSync};
use crate::render::{CardContent, CardRenderer, SETTINGS_TEMPLATE};
use crate::resolve::Resolver;
use crate::store::{ConfigStore, GlobalStyles};
use crate::style::{StyleFamily, StyleKey, StyleMap, StyleOverrides, ValueRule};

const PAGE_TITLE: &str = "Media Library Item Settings";

/// Client script driving the settings page: tab switching, live preview
/// updates and the per-tab reset buttons. It reads the [`SettingsPage::bootstrap`]
/// document and follows the same rules as [`PreviewSync`].
pub const SETTINGS_SCRIPT: &str = include_str!("templates/settings.js");

/// A submitted settings form, one field map per family.
///
/// Field maps are keyed by registry name. Missing fields take their default
/// on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub typography: BTreeMap<String, String>,
}

impl SettingsForm {
    /// Reads raw form fields named `<record>[<key>]`.
    ///
    /// Fields for other records are ignored.
    pub fn from_fields<'a, I>(fields: I, config: &CardConfig) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut form = Self::default();
        for (name, value) in fields {
            let Some((record, key)) = name
                .strip_suffix(']')
                .and_then(|name| name.split_once('['))
            else {
                continue;
            };
            let family = StyleFamily::ALL
                .into_iter()
                .find(|&family| config.record_name(family) == record);
            if let Some(family) = family {
                form.family_mut(family).insert(key.to_string(), value.to_string());
            }
        }
        form
    }

    fn family_mut(&mut self, family: StyleFamily) -> &mut BTreeMap<String, String> {
        match family {
            StyleFamily::Colors => &mut self.colors,
            StyleFamily::Typography => &mut self.typography,
        }
    }

    fn family(&self, family: StyleFamily) -> &BTreeMap<String, String> {
        match family {
            StyleFamily::Colors => &self.colors,
            StyleFamily::Typography => &self.typography,
        }
    }

    /// The submitted values as overrides. A key submitted under the wrong
    /// family is dropped.
    pub fn overrides(&self) -> StyleOverrides {
        let mut overrides = StyleOverrides::new();
        for family in StyleFamily::ALL {
            for (name, value) in self.family(family) {
                match name.parse::<StyleKey>() {
                    Ok(key) if key.family() == family => overrides.insert(key, value.clone()),
                    _ => tracing::debug!("Ignoring submitted field '{}'", name),
                }
            }
        }
        overrides
    }
}

#[derive(Debug, Serialize)]
struct Field {
    key: StyleKey,
    id: String,
    input_name: String,
    label: String,
    kind: &'static str,
    value: String,
    default: String,
}

#[derive(Debug, Serialize)]
struct Tab {
    id: &'static str,
    label: &'static str,
    fields: Vec<Field>,
}

fn field_kind(rule: ValueRule) -> &'static str {
    match rule {
        ValueRule::HexColor => "color",
        ValueRule::FontFamily => "font_family",
        ValueRule::FontWeight => "font_weight",
        ValueRule::FontSize | ValueRule::LineHeight => "text",
    }
}

fn family_label(family: StyleFamily) -> &'static str {
    match family {
        StyleFamily::Colors => "Colors",
        StyleFamily::Typography => "Typography",
    }
}

/// The administrator-facing settings page.
#[derive(Debug, Clone, Copy)]
pub struct SettingsPage<'r> {
    resolver: Resolver<'r>,
    renderer: &'r CardRenderer,
}

impl<'r> SettingsPage<'r> {
    pub fn new(renderer: &'r CardRenderer) -> Self {
        Self {
            resolver: Resolver::standard(),
            renderer,
        }
    }

    /// Uses `resolver` instead of the built-in registry.
    pub fn with_resolver(mut self, resolver: Resolver<'r>) -> Self {
        self.resolver = resolver;
        self
    }

    fn config(&self) -> &'r CardConfig {
        self.renderer.config()
    }

    /// Renders the form, filled with the resolved global styles, next to a
    /// preview card styled the same way.
    pub fn render(&self, globals: &GlobalStyles) -> Result<String> {
        let config = self.config();
        let registry = self.resolver.registry();
        let styles = self.resolver.resolve_global(globals);

        let tabs: Vec<Tab> = StyleFamily::ALL
            .into_iter()
            .map(|family| Tab {
                id: family.as_str(),
                label: family_label(family),
                fields: family
                    .keys()
                    .map(|key| Field {
                        key,
                        id: format!("{}_{}", config.record_name(family), key),
                        input_name: format!("{}[{}]", config.record_name(family), key),
                        label: key.label(),
                        kind: field_kind(ValueRule::for_key(key)),
                        value: styles.get(key).to_string(),
                        default: registry.default_value(key).to_string(),
                    })
                    .collect(),
            })
            .collect();

        let preview_css = emit(&styles, &Scope::preview(&config.preview_root_id));
        let bootstrap = embed_json(&self.bootstrap());

        self.renderer.render(
            SETTINGS_TEMPLATE,
            &context! {
                page_title => PAGE_TITLE,
                form_action => "options.php",
                tabs,
                font_families => registry.font_families(),
                font_weights => registry.font_weights(),
                preview_root => config.preview_root_id,
                preview_css,
                card => CardContent::sample(config),
                bootstrap,
                script => SETTINGS_SCRIPT,
            },
        )
    }

    /// The document a client script needs to mirror [`PreviewSync`]: the
    /// binding table, defaults, rule names with their patterns and the
    /// select options.
    pub fn bootstrap(&self) -> serde_json::Value {
        let config = self.config();
        let registry = self.resolver.registry();

        let mut bindings = serde_json::Map::new();
        let mut defaults = serde_json::Map::new();
        let mut rules = serde_json::Map::new();
        let mut patterns = serde_json::Map::new();
        for &key in StyleKey::all() {
            let rule = ValueRule::for_key(key);
            bindings.insert(key.to_string(), json!(binding(key)));
            defaults.insert(key.to_string(), json!(registry.default_value(key)));
            rules.insert(key.to_string(), json!(rule));
            if let Some(pattern) = rule.pattern() {
                patterns.insert(rule.as_str().to_string(), json!(pattern));
            }
        }

        json!({
            "previewRoot": config.preview_root_id,
            "hoverStyleId": config.hover_style_id,
            "bindings": bindings,
            "defaults": defaults,
            "rules": rules,
            "patterns": patterns,
            "fontFamilies": registry.font_families(),
            "fontWeights": registry.font_weights(),
        })
    }

    /// Validates a submitted form and writes both records.
    ///
    /// Invalid values are replaced by their defaults and missing values take
    /// their defaults. Returns the saved style map.
    pub fn submit<S: ConfigStore + ?Sized>(&self, store: &mut S, form: &SettingsForm) -> Result<StyleMap> {
        let styles = self.resolver.resolve(Some(&form.overrides()), None, true);
        GlobalStyles::save(store, self.config(), &styles, &StyleFamily::ALL)?;
        Ok(styles)
    }

    /// A preview synchronizer starting from the saved global styles.
    pub fn preview<S: PreviewSurface>(&self, surface: S, globals: &GlobalStyles) -> PreviewSync<'r, S> {
        PreviewSync::new(
            self.resolver.registry(),
            surface,
            self.resolver.resolve_global(globals),
            self.config(),
        )
    }
}

/// JSON text safe to place inside a `<script>` element.
fn embed_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}
