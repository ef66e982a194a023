//! # mediacard
//!
//! Downloadable media item cards with a layered, validated style
//! configuration.
//!
//! A card shows one media library attachment: a document icon, a type badge,
//! the title, the file size and a download button. Twenty-six style keys
//! (ten colors and sixteen typography settings) control how it looks.
//! Values come from three layers:
//!
//! 1. a page-builder widget instance, per family, unless the instance uses
//!    the global settings for that family
//! 2. the global records saved from the settings page
//! 3. the registry defaults
//!
//! Every value is validated against its key's rule. Invalid input never
//! breaks a page: it resolves to the default.
//!
//! ## Quick start
//!
//! ```rust
//! use mediacard::{emit, ColorKey, Resolver, Scope, StyleKey, StyleOverrides};
//!
//! let title = StyleKey::Color(ColorKey::Title);
//! let global = StyleOverrides::new().with(title, "#0055aa");
//!
//! let styles = Resolver::standard().resolve(Some(&global), None, true);
//! let css = emit(&styles, &Scope::global());
//!
//! assert!(css.contains(".media-item__title { color: #0055aa;"));
//! ```
//!
//! ## Modules
//!
//! - [`style`]: keys, value rules, the registry and style maps
//! - [`resolve`]: layered resolution into a complete [`StyleMap`]
//! - [`css`]: the selector binding table and the CSS emitter
//! - [`preview`]: mirroring unsaved edits into a preview surface
//! - [`store`]: loading and saving the global records
//! - [`render`]: attachments and the card templates
//! - [`shortcode`], [`widget`], [`settings`]: the three consumers
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod css;
pub mod error;
pub mod preview;
pub mod render;
pub mod resolve;
pub mod settings;
pub mod shortcode;
pub mod store;
pub mod style;
pub mod widget;

pub use config::{CardConfig, Messages};
pub use css::{binding, emit, emit_binding, style_block, RenderTarget, Scope, SelectorBinding};
pub use error::{Error, Result};
pub use preview::{FieldUpdate, PreviewDocument, PreviewSurface, PreviewSync};
pub use render::{
    format_size, Attachment, AttachmentStore, CardContent, CardRenderer, CardRequest,
    MemoryAttachments,
};
pub use resolve::{Resolver, UseGlobal};
pub use settings::{SettingsForm, SettingsPage};
pub use shortcode::{expand_shortcodes, head_styles, Shortcode};
pub use store::{ConfigStore, GlobalStyles, JsonFileStore, MemoryStore};
pub use style::{
    ColorKey, FontProperty, StyleFamily, StyleKey, StyleMap, StyleOverrides, StyleRegistry,
    TextElement, ValueRule,
};
pub use widget::{WidgetRenderer, WidgetSettings};
