//! Codecs, serde field helpers and the editor session.

mod document;
mod editor;
pub(crate) mod fields;
mod wire;

pub use document::{FormatError, decode_document, encode_document};
pub use editor::{CommandEditor, EditError, EditorLauncher, edit_notes};
pub use wire::{decode_wire, encode_wire};
