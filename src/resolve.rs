//! Resolution of layered style input into a complete style map.
//!
//! Values are looked up in three layers, most specific first:
//!
//! 1. the widget instance override (only for families not switched to "use global")
//! 2. the stored global record
//! 3. the registry default
//!
//! The first layer holding a non-empty value wins, and that value is then
//! validated. An invalid value resolves to the registry default; it does not
//! fall through to the next layer.

use crate::store::GlobalStyles;
use crate::style::{StyleFamily, StyleKey, StyleMap, StyleOverrides, StyleRegistry};

/// Per-family "use global settings" switches.
///
/// A family switched on ignores the instance override for all of its keys.
/// Both switches default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseGlobal {
    pub colors: bool,
    pub typography: bool,
}

impl UseGlobal {
    pub fn new(colors: bool, typography: bool) -> Self {
        Self { colors, typography }
    }

    pub fn for_family(self, family: StyleFamily) -> bool {
        match family {
            StyleFamily::Colors => self.colors,
            StyleFamily::Typography => self.typography,
        }
    }
}

impl Default for UseGlobal {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl From<bool> for UseGlobal {
    fn from(all: bool) -> Self {
        Self::new(all, all)
    }
}

/// Merges overrides with defaults to produce validated [`StyleMap`]s.
///
/// Resolution is a pure function of its inputs: the same inputs always give
/// the same map.
///
/// # Example
///
/// ```rust
/// use mediacard::{ColorKey, Resolver, StyleKey, StyleOverrides};
///
/// let title = StyleKey::Color(ColorKey::Title);
/// let global = StyleOverrides::new().with(title, "#111111");
/// let instance = StyleOverrides::new().with(title, "#222222");
///
/// let resolver = Resolver::standard();
/// let own = resolver.resolve(Some(&global), Some(&instance), false);
/// let shared = resolver.resolve(Some(&global), Some(&instance), true);
///
/// assert_eq!(own.get(title), "#222222");
/// assert_eq!(shared.get(title), "#111111");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r StyleRegistry,
}

impl Resolver<'static> {
    /// A resolver backed by the built-in registry.
    pub fn standard() -> Self {
        Self::new(StyleRegistry::standard())
    }
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r StyleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r StyleRegistry {
        self.registry
    }

    /// Resolves every key from the instance override, the global record and
    /// the registry defaults.
    ///
    /// `use_global` accepts either a single `bool` for both families or a
    /// [`UseGlobal`] with one switch per family.
    pub fn resolve(
        &self,
        global: Option<&StyleOverrides>,
        instance: Option<&StyleOverrides>,
        use_global: impl Into<UseGlobal>,
    ) -> StyleMap {
        let use_global = use_global.into();
        let values = StyleKey::all()
            .iter()
            .map(|&key| {
                let from_instance = if use_global.for_family(key.family()) {
                    None
                } else {
                    instance.and_then(|overrides| overrides.get(key))
                };
                let raw = from_instance.or_else(|| global.and_then(|overrides| overrides.get(key)));
                match raw {
                    Some(raw) => self.registry.validate(key, raw),
                    None => self.registry.default_value(key).to_string(),
                }
            })
            .collect();
        StyleMap::from_values(values)
    }

    /// Resolves the page-wide map from the stored global records alone.
    pub fn resolve_global(&self, globals: &GlobalStyles) -> StyleMap {
        self.resolve(globals.overrides().as_ref(), None, true)
    }

    /// Resolves a widget instance against the stored global records.
    pub fn resolve_instance(
        &self,
        globals: &GlobalStyles,
        instance: &StyleOverrides,
        use_global: UseGlobal,
    ) -> StyleMap {
        self.resolve(globals.overrides().as_ref(), Some(instance), use_global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ColorKey, FontProperty, TextElement};

    fn title() -> StyleKey {
        StyleKey::Color(ColorKey::Title)
    }

    fn title_size() -> StyleKey {
        StyleKey::typography(TextElement::Title, FontProperty::FontSize)
    }

    #[test]
    fn test_absent_inputs_resolve_to_defaults() {
        let resolver = Resolver::standard();
        let map = resolver.resolve(None, None, true);
        assert_eq!(map, StyleRegistry::standard().defaults());
    }

    #[test]
    fn test_instance_wins_when_not_using_global() {
        let global = StyleOverrides::new().with(title(), "#111111");
        let instance = StyleOverrides::new().with(title(), "#222222");
        let map = Resolver::standard().resolve(Some(&global), Some(&instance), false);
        assert_eq!(map.get(title()), "#222222");
    }

    #[test]
    fn test_instance_ignored_when_using_global() {
        let global = StyleOverrides::new().with(title(), "#111111");
        let instance = StyleOverrides::new().with(title(), "#222222");
        let map = Resolver::standard().resolve(Some(&global), Some(&instance), true);
        assert_eq!(map.get(title()), "#111111");
    }

    #[test]
    fn test_missing_instance_key_falls_back_to_global_then_default() {
        let global = StyleOverrides::new().with(title(), "#111111");
        let instance = StyleOverrides::new().with(StyleKey::Color(ColorKey::Size), "#333333");
        let map = Resolver::standard().resolve(Some(&global), Some(&instance), false);
        assert_eq!(map.get(title()), "#111111");
        assert_eq!(map.get(StyleKey::Color(ColorKey::Size)), "#333333");
        assert_eq!(map.get(StyleKey::Color(ColorKey::FooterBg)), "#2d3748");
    }

    #[test]
    fn test_empty_instance_value_is_unset() {
        let global = StyleOverrides::new().with(title(), "#111111");
        let instance = StyleOverrides::new().with(title(), "");
        let map = Resolver::standard().resolve(Some(&global), Some(&instance), false);
        assert_eq!(map.get(title()), "#111111");
    }

    #[test]
    fn test_invalid_value_resolves_to_default() {
        let global = StyleOverrides::new().with(title(), "#111111");
        let instance = StyleOverrides::new().with(title(), "blue");
        let map = Resolver::standard().resolve(Some(&global), Some(&instance), false);
        assert_eq!(map.get(title()), "#1a202c");
    }

    #[test]
    fn test_corrupted_global_is_revalidated() {
        let global = StyleOverrides::new().with(title_size(), "18");
        let map = Resolver::standard().resolve(Some(&global), None, true);
        assert_eq!(map.get(title_size()), "24px");
    }

    #[test]
    fn test_family_level_switches() {
        let global = StyleOverrides::new()
            .with(title(), "#111111")
            .with(title_size(), "20px");
        let instance = StyleOverrides::new()
            .with(title(), "#222222")
            .with(title_size(), "30px");

        let map = Resolver::standard().resolve(
            Some(&global),
            Some(&instance),
            UseGlobal::new(false, true),
        );
        assert_eq!(map.get(title()), "#222222");
        assert_eq!(map.get(title_size()), "20px");

        let map = Resolver::standard().resolve(
            Some(&global),
            Some(&instance),
            UseGlobal::new(true, false),
        );
        assert_eq!(map.get(title()), "#111111");
        assert_eq!(map.get(title_size()), "30px");
    }

    #[test]
    fn test_custom_registry_defaults() {
        let registry = StyleRegistry::new().with_default(title(), "#000000");
        let map = Resolver::new(&registry).resolve(None, None, true);
        assert_eq!(map.get(title()), "#000000");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let global = StyleOverrides::new().with(title(), "#abc");
        let instance = StyleOverrides::new().with(title_size(), "2rem");
        let resolver = Resolver::standard();
        let a = resolver.resolve(Some(&global), Some(&instance), false);
        let b = resolver.resolve(Some(&global), Some(&instance), false);
        assert_eq!(a, b);
    }
}
