//! # relayout
//!
//! Document structure reconstruction from positioned text.
//!
//! This library turns pages of positioned text fragments (vector text from
//! a PDF content stream) or OCR line boxes into a flat, page-ordered
//! document model of headings, paragraphs, lists and simple tables, ready
//! for a word-processor serializer.
//!
//! ## Quick Start
//!
//! ```
//! use relayout::{reconstruct_from_vector_text, ReconstructOptions, StructuralNode, TextFragment};
//!
//! let page = vec![
//!     TextFragment::new("INTRODUCTION", 72.0, 700.0, 24.0),
//!     TextFragment::new("This is body text.", 72.0, 680.0, 12.0),
//! ];
//! let doc = reconstruct_from_vector_text(&[page], &ReconstructOptions::default())?;
//!
//! assert_eq!(doc.nodes[0], StructuralNode::heading(1, "INTRODUCTION"));
//! assert_eq!(doc.nodes[1], StructuralNode::paragraph("This is body text."));
//! # Ok::<(), relayout::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Two input paths**: vector text (font-size headings, table detection)
//!   and OCR line boxes (paragraph clustering, text-shape headings)
//! - **Low-density detection**: near-empty pages become scan warnings
//! - **Guardrails**: page limits, page selection, OCR quality presets
//! - **Progress and cancellation** for long documents
//! - **Output formats** for inspection: Markdown, plain text, JSON

pub mod error;
pub mod model;
pub mod parser;
pub mod policy;
pub mod reconstruct;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    ConversionSummary, Document, ListKind, OcrLine, RecordedPage, StructuralNode, TextFragment,
};
pub use parser::{ErrorMode, LayoutThresholds, ReconstructOptions};
pub use policy::{PageSelection, QualityPreset, MAX_PAGES_LIMIT};
pub use reconstruct::{CancelToken, DocumentBuilder, PageProgress, Reconstructor};
pub use render::{JsonFormat, RenderOptions};

use std::path::Path;

/// Reconstruct a document from pages of vector text.
///
/// `pages[i]` holds the fragments of page `i + 1`.
///
/// # Errors
///
/// Returns `Error::Configuration` for out-of-range options, and
/// `Error::InputShape` for malformed pages in strict mode.
pub fn reconstruct_from_vector_text(
    pages: &[Vec<TextFragment>],
    options: &ReconstructOptions,
) -> Result<Document> {
    Reconstructor::new(options.clone())?.vector_text(pages)
}

/// Reconstruct a document from pages of OCR line boxes.
///
/// OCR output never yields tables.
///
/// # Example
///
/// ```
/// use relayout::{reconstruct_from_ocr, OcrLine, ReconstructOptions};
///
/// let page = vec![
///     OcrLine::new("SECTION ONE", 100.0, 120.0),
///     OcrLine::new("The quick brown fox", 160.0, 180.0),
///     OcrLine::new("jumps over the dog.", 182.0, 202.0),
/// ];
/// let doc = reconstruct_from_ocr(&[page], &ReconstructOptions::default())?;
/// assert_eq!(doc.len(), 2);
/// # Ok::<(), relayout::Error>(())
/// ```
pub fn reconstruct_from_ocr(pages: &[Vec<OcrLine>], options: &ReconstructOptions) -> Result<Document> {
    Reconstructor::new(options.clone())?.ocr(pages)
}

/// Reconstruct recorded vector-text pages from a JSON file and render them as Markdown.
pub fn vector_file_to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Relayout::new().vector_file(path)?.to_markdown()
}

/// Builder for reconstructing and rendering documents.
///
/// # Example
///
/// ```
/// use relayout::{OcrLine, Relayout};
///
/// let markdown = Relayout::new()
///     .with_max_pages(10)
///     .strict()
///     .ocr(&[vec![OcrLine::new("Key findings:", 10.0, 30.0)]])?
///     .to_markdown()?;
/// assert_eq!(markdown, "## Key findings:");
/// # Ok::<(), relayout::Error>(())
/// ```
pub struct Relayout {
    options: ReconstructOptions,
    render_options: RenderOptions,
}

impl Relayout {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ReconstructOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on the first malformed page.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, try_tables: bool) -> Self {
        self.options = self.options.with_tables(try_tables);
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.options = self.options.with_max_pages(max_pages);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set layout thresholds.
    pub fn with_thresholds(mut self, thresholds: LayoutThresholds) -> Self {
        self.options = self.options.with_thresholds(thresholds);
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Reconstruct vector-text pages.
    pub fn vector_text(self, pages: &[Vec<TextFragment>]) -> Result<RelayoutResult> {
        let document = reconstruct_from_vector_text(pages, &self.options)?;
        Ok(RelayoutResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Reconstruct OCR pages.
    pub fn ocr(self, pages: &[Vec<OcrLine>]) -> Result<RelayoutResult> {
        let document = reconstruct_from_ocr(pages, &self.options)?;
        Ok(RelayoutResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load and reconstruct recorded vector-text pages from a JSON file.
    pub fn vector_file<P: AsRef<Path>>(self, path: P) -> Result<RelayoutResult> {
        let pages = model::input::load_vector_pages(path)?;
        let document = Reconstructor::new(self.options)?.vector_records(&pages)?;
        Ok(RelayoutResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Load and reconstruct recorded OCR pages from a JSON file.
    pub fn ocr_file<P: AsRef<Path>>(self, path: P) -> Result<RelayoutResult> {
        let pages = model::input::load_ocr_pages(path)?;
        let document = Reconstructor::new(self.options)?.ocr_records(&pages)?;
        Ok(RelayoutResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Relayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a reconstruction run.
#[derive(Debug)]
pub struct RelayoutResult {
    /// The reconstructed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl RelayoutResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relayout_builder() {
        let relayout = Relayout::new()
            .strict()
            .with_tables(false)
            .with_pages(PageSelection::Range(1..=3));

        assert_eq!(relayout.options.error_mode, ErrorMode::Strict);
        assert!(!relayout.options.try_tables);
        assert!(relayout.options.pages.includes(2));
    }

    #[test]
    fn test_invalid_max_pages() {
        let result = reconstruct_from_ocr(&[], &ReconstructOptions::new().with_max_pages(0));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_empty_input() {
        let doc = reconstruct_from_vector_text(&[], &ReconstructOptions::default()).unwrap();
        assert!(doc.is_empty());
        assert!(!doc.needs_ocr());
    }

    #[test]
    fn test_missing_file() {
        let result = Relayout::new().vector_file("/nonexistent/pages.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_result_renders() {
        let result = Relayout::new()
            .ocr(&[vec![OcrLine::new("Plain words here.", 0.0, 20.0)]])
            .unwrap();

        assert_eq!(result.to_text().unwrap(), "Plain words here.");
        assert!(result.to_json(JsonFormat::Compact).unwrap().contains("paragraph"));
        assert_eq!(result.into_document().len(), 1);
    }
}
