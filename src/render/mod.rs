//! Card markup.
//!
//! - [`Attachment`] and [`AttachmentStore`]: the media library lookup
//! - [`CardContent`]: display-ready values for one card
//! - [`CardRenderer`]: minijinja templates for the card, the error fragment
//!   and the settings page

mod attachment;
mod filters;
mod renderer;
mod util;

pub use attachment::{Attachment, AttachmentStore, CardContent, CardRequest, MemoryAttachments};
pub use renderer::{CardRenderer, CARD_TEMPLATE, ERROR_TEMPLATE, SETTINGS_TEMPLATE};
pub use util::{file_extension, format_size, mime_label};
