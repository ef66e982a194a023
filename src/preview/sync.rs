//! Mirroring unsaved field edits into a preview surface.

use std::collections::BTreeMap;

use super::surface::PreviewSurface;
use crate::config::CardConfig;
use crate::css::{binding, emit, emit_binding, Scope};
use crate::style::{StyleFamily, StyleKey, StyleMap, StyleRegistry};

/// Outcome of a single field edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    /// The value was valid and pushed to the surface.
    Applied,
    /// The value failed its rule; the surface keeps the last valid value.
    Rejected,
}

/// Keeps a preview surface in step with edits to the settings fields.
///
/// Unlike the resolver, an invalid edit is not replaced by the default: the
/// preview keeps showing the last valid value so partially typed input does
/// not flash a different style.
///
/// # Example
///
/// ```rust
/// use mediacard::{CardConfig, ColorKey, FieldUpdate, PreviewDocument, PreviewSync, StyleKey, StyleRegistry};
///
/// let registry = StyleRegistry::standard();
/// let mut sync = PreviewSync::new(registry, PreviewDocument::new(), registry.defaults(), &CardConfig::default());
///
/// let title = StyleKey::Color(ColorKey::Title);
/// assert_eq!(sync.on_field_change(title, "#ff0000"), FieldUpdate::Applied);
/// assert_eq!(sync.on_field_change(title, "#ff00"), FieldUpdate::Rejected);
/// assert_eq!(
///     sync.surface().style("#cg-media-item-preview .media-item__title", "color"),
///     Some("#ff0000")
/// );
/// ```
#[derive(Debug)]
pub struct PreviewSync<'r, S: PreviewSurface> {
    registry: &'r StyleRegistry,
    surface: S,
    scope: Scope,
    hover_style_id: String,
    controls: BTreeMap<StyleKey, String>,
    applied: StyleMap,
}

impl<'r, S: PreviewSurface> PreviewSync<'r, S> {
    /// Creates a synchronizer whose fields start at `initial`, typically the
    /// saved global style map the settings page was rendered with.
    pub fn new(registry: &'r StyleRegistry, surface: S, initial: StyleMap, config: &CardConfig) -> Self {
        let controls = initial
            .iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        Self {
            registry,
            surface,
            scope: Scope::preview(&config.preview_root_id),
            hover_style_id: config.hover_style_id.clone(),
            controls,
            applied: initial,
        }
    }

    /// Handles an edit of one field.
    ///
    /// The field's displayed value always becomes `raw`. The surface is only
    /// touched when `raw` passes the key's rule.
    pub fn on_field_change(&mut self, key: StyleKey, raw: &str) -> FieldUpdate {
        self.controls.insert(key, raw.to_string());

        if !self.registry.check(key, raw) {
            tracing::trace!("Preview ignoring invalid '{}' for '{}'", raw, key);
            return FieldUpdate::Rejected;
        }
        let binding = binding(key);
        self.applied.set_checked(key, raw.to_string());
        if binding.is_stateful() {
            // Interaction states cannot be set inline; the fragment is rewritten whole.
            let css = emit_binding(&binding, &self.scope, raw, true);
            self.surface.replace_stylesheet(&self.hover_style_id, &css);
        } else {
            let selector = self.scope.selector(binding.selector);
            for property in binding.properties {
                self.surface.set_style(&selector, property, raw);
            }
        }
        tracing::trace!("Preview applied '{}' = '{}'", key, raw);
        FieldUpdate::Applied
    }

    /// Resets every field of `family` to its default.
    ///
    /// Each default goes through [`on_field_change`](Self::on_field_change),
    /// exactly as if it had been typed into the field.
    pub fn reset(&mut self, family: StyleFamily) -> Vec<(StyleKey, FieldUpdate)> {
        family
            .keys()
            .map(|key| {
                let default = self.registry.default_value(key).to_string();
                (key, self.on_field_change(key, &default))
            })
            .collect()
    }

    /// The value currently displayed in the field for `key`.
    pub fn control_value(&self, key: StyleKey) -> &str {
        self.controls.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// The last valid value of every field.
    pub fn applied(&self) -> &StyleMap {
        &self.applied
    }

    /// The preview-scoped CSS equivalent of the applied values.
    pub fn stylesheet(&self) -> String {
        emit(&self.applied, &self.scope)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
