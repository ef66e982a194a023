//! Live preview of unsaved style edits.
//!
//! - [`PreviewSurface`]: the document being updated
//! - [`PreviewDocument`]: an in-memory surface
//! - [`PreviewSync`]: validates single-field edits and pushes them to the surface

mod surface;
mod sync;

pub use surface::{PreviewDocument, PreviewSurface};
pub use sync::{FieldUpdate, PreviewSync};
