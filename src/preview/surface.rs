//! Preview surfaces.

use std::collections::BTreeMap;

/// A live document showing the preview card.
///
/// Implementations forward these calls to the rendering surface (a browser
/// DOM bridge, a webview, ...). [`PreviewDocument`] records them in memory.
pub trait PreviewSurface {
    /// Sets an inline style property on every element matching `selector`.
    fn set_style(&mut self, selector: &str, property: &str, value: &str);

    /// Replaces the whole content of the stylesheet fragment `id`,
    /// creating it if it does not exist.
    fn replace_stylesheet(&mut self, id: &str, css: &str);
}

impl<S: PreviewSurface + ?Sized> PreviewSurface for &mut S {
    fn set_style(&mut self, selector: &str, property: &str, value: &str) {
        (**self).set_style(selector, property, value);
    }

    fn replace_stylesheet(&mut self, id: &str, css: &str) {
        (**self).replace_stylesheet(id, css);
    }
}

/// An in-memory preview surface.
///
/// Keeps the last inline value per `(selector, property)` and the current
/// content of each stylesheet fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDocument {
    inline: BTreeMap<(String, String), String>,
    stylesheets: BTreeMap<String, String>,
    writes: usize,
}

impl PreviewDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The inline value last written for `selector` and `property`.
    pub fn style(&self, selector: &str, property: &str) -> Option<&str> {
        self.inline
            .get(&(selector.to_string(), property.to_string()))
            .map(String::as_str)
    }

    /// The current content of stylesheet fragment `id`.
    pub fn stylesheet(&self, id: &str) -> Option<&str> {
        self.stylesheets.get(id).map(String::as_str)
    }

    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Total number of surface writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PreviewSurface for PreviewDocument {
    fn set_style(&mut self, selector: &str, property: &str, value: &str) {
        self.inline
            .insert((selector.to_string(), property.to_string()), value.to_string());
        self.writes += 1;
    }

    fn replace_stylesheet(&mut self, id: &str, css: &str) {
        self.stylesheets.insert(id.to_string(), css.to_string());
        self.writes += 1;
    }
}
