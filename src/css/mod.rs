//! CSS output for resolved style maps.
//!
//! - [`SelectorBinding`]: the key to selector/property table
//! - [`Scope`] and [`RenderTarget`]: how selectors are prefixed per consumer
//! - [`emit`]: renders a [`StyleMap`](crate::StyleMap) into CSS rule text

mod binding;
mod emitter;

pub use binding::{binding, PseudoState, SelectorBinding};
pub use emitter::{emit, emit_binding, style_block, RenderTarget, Scope};
