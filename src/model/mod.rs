//! Document model types.
//!
//! Input types describe what the rendering and OCR collaborators hand to the
//! engine; the output model is the flat node sequence handed to a
//! word-processor serializer.

mod document;
pub mod input;
mod node;

pub use document::{ConversionSummary, Document};
pub use input::{OcrLine, RecordedPage, TextFragment};
pub use node::{ListKind, StructuralNode};
