//! Rendering style maps as CSS text.

use std::fmt;

use super::binding::{binding, SelectorBinding};
use crate::config::CardConfig;
use crate::style::StyleMap;

/// The consumer a block of CSS is produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Page-level `<style>` block with bare selectors.
    GlobalPage,
    /// Inline `<style>` block for one page-builder widget instance.
    WidgetInstance(String),
    /// The settings page preview surface.
    LivePreview,
}

/// A selector prefix shared by every rule of one emitted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    prefix: String,
}

impl Scope {
    /// Bare selectors, for the page-level stylesheet.
    pub fn global() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Selectors nested under the wrapper class of one widget instance.
    pub fn instance(class_prefix: &str, instance_id: &str) -> Self {
        let class = format!("{}{}", class_prefix, instance_id);
        Self {
            prefix: format!(".{} ", css_identifier(&class)),
        }
    }

    /// Selectors nested under the preview root element.
    pub fn preview(root_id: &str) -> Self {
        Self {
            prefix: format!("#{} ", css_identifier(root_id)),
        }
    }

    pub fn for_target(target: &RenderTarget, config: &CardConfig) -> Self {
        match target {
            RenderTarget::GlobalPage => Self::global(),
            RenderTarget::WidgetInstance(id) => Self::instance(&config.instance_class_prefix, id),
            RenderTarget::LivePreview => Self::preview(&config.preview_root_id),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Applies the prefix to one selector.
    pub fn selector(&self, selector: &str) -> String {
        format!("{}{}", self.prefix, selector)
    }
}

fn css_identifier(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    // Writing into a String cannot fail.
    let _ = cssparser::serialize_identifier(raw, &mut escaped);
    escaped
}

struct Declaration<'a> {
    property: &'static str,
    value: &'a str,
}

fn declarations<'a>(
    binding: &SelectorBinding,
    value: &'a str,
) -> impl Iterator<Item = Declaration<'a>> {
    let properties: &'static [&'static str] = binding.properties;
    properties
        .iter()
        .map(move |&property| Declaration { property, value })
}

struct Rule<'a> {
    selectors: String,
    declarations: Vec<Declaration<'a>>,
    important: bool,
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selectors)?;
        for declaration in &self.declarations {
            write!(f, " {}: {}", declaration.property, declaration.value)?;
            if self.important {
                f.write_str(" !important")?;
            }
            f.write_str(";")?;
        }
        writeln!(f, " }}")
    }
}

/// Renders `map` as CSS rules under `scope`.
///
/// Keys are visited in canonical order. Keys bound to the same selector list
/// share one rule, placed where the first of them appears, so emitting the
/// same map twice always yields identical text.
///
/// # Example
///
/// ```rust
/// use mediacard::{emit, Scope, StyleRegistry};
///
/// let css = emit(&StyleRegistry::standard().defaults(), &Scope::global());
/// assert!(css.starts_with(".media-item { background-color: #f9f9f9; }\n"));
/// ```
pub fn emit(map: &StyleMap, scope: &Scope) -> String {
    let mut rules: Vec<Rule<'_>> = Vec::new();

    for (key, value) in map.iter() {
        let binding = binding(key);
        let selectors = binding.selector_list(scope);
        let declarations = declarations(&binding, value);
        match rules.iter_mut().find(|rule| rule.selectors == selectors) {
            Some(rule) => rule.declarations.extend(declarations),
            None => rules.push(Rule {
                selectors,
                declarations: declarations.collect(),
                important: false,
            }),
        }
    }

    rules.iter().map(Rule::to_string).collect()
}

/// Renders a single binding as one rule.
///
/// Every property of the binding is set to `value`.
///
/// `important` marks the declaration `!important`, which lets a stylesheet
/// rule win over inline styles written by the live preview.
pub fn emit_binding(binding: &SelectorBinding, scope: &Scope, value: &str, important: bool) -> String {
    Rule {
        selectors: binding.selector_list(scope),
        declarations: declarations(binding, value).collect(),
        important,
    }
    .to_string()
}

/// Wraps CSS text in a `<style>` element.
///
/// Only emit output should be passed here: its values are validated, so
/// they cannot close the element early.
pub fn style_block(css: &str) -> String {
    format!("<style type=\"text/css\">\n{}</style>\n", css)
}
