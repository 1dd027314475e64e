//! Incremental document assembly.

use crate::error::{Error, Result};
use crate::model::{ConversionSummary, Document, OcrLine, StructuralNode, TextFragment};
use crate::parser::{
    count_chars, reconstruct_ocr_page, reconstruct_vector_page, ErrorMode, ReconstructOptions,
};

/// Builds a [`Document`] from pages pushed one at a time.
///
/// Pages are numbered by the caller (1-indexed) and must be pushed in
/// order. Pages outside the selection or past `max_pages` are counted but
/// not processed.
///
/// # Example
///
/// ```
/// use relayout::{DocumentBuilder, ReconstructOptions, TextFragment};
///
/// let mut builder = DocumentBuilder::new(ReconstructOptions::default())?;
/// builder.push_vector_page(1, &[
///     TextFragment::new("INTRODUCTION", 72.0, 700.0, 24.0),
///     TextFragment::new("This is body text.", 72.0, 680.0, 12.0),
/// ])?;
/// let doc = builder.finish();
/// assert_eq!(doc.len(), 2);
/// # Ok::<(), relayout::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentBuilder {
    options: ReconstructOptions,
    nodes: Vec<StructuralNode>,
    summary: ConversionSummary,
    vector_pages: u32,
    vector_chars: usize,
    truncation_logged: bool,
}

impl DocumentBuilder {
    /// Create a builder, rejecting invalid options up front.
    pub fn new(options: ReconstructOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            nodes: Vec::new(),
            summary: ConversionSummary::default(),
            vector_pages: 0,
            vector_chars: 0,
            truncation_logged: false,
        })
    }

    /// Options the builder runs with.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Check whether a page would be processed if pushed next.
    pub fn accepts(&self, page_number: u32) -> bool {
        self.options.pages.includes(page_number)
            && self.summary.pages_processed < self.options.max_pages
    }

    /// Number of pages processed so far.
    pub fn pages_processed(&self) -> u32 {
        self.summary.pages_processed
    }

    /// Push one page of vector text.
    ///
    /// Returns `Ok(true)` if the page was processed, `Ok(false)` if it was
    /// skipped by page selection or the page limit.
    pub fn push_vector_page(&mut self, page_number: u32, fragments: &[TextFragment]) -> Result<bool> {
        if !self.admit(page_number) {
            return Ok(false);
        }

        if let Err(e) = fragments.iter().try_for_each(|f| f.validate(page_number)) {
            self.recover(page_number, e)?;
            return Ok(true);
        }

        let chars = count_chars(fragments);
        self.vector_pages += 1;
        self.vector_chars += chars;

        if chars < self.options.thresholds.empty_page_chars {
            log::debug!(
                "Page {}: {} characters of text, emitting scan warning",
                page_number,
                chars
            );
            self.summary.low_density_pages.push(page_number);
            self.append_page(vec![StructuralNode::scan_warning(page_number)]);
            return Ok(true);
        }

        let nodes =
            reconstruct_vector_page(fragments, &self.options.thresholds, self.options.try_tables);
        log::debug!("Page {}: {} nodes", page_number, nodes.len());
        self.append_page(nodes);
        Ok(true)
    }

    /// Push one page of OCR line boxes.
    ///
    /// Returns `Ok(true)` if the page was processed.
    pub fn push_ocr_page(&mut self, page_number: u32, lines: &[OcrLine]) -> Result<bool> {
        if !self.admit(page_number) {
            return Ok(false);
        }
        self.summary.ocr_dpi = Some(self.options.quality.dpi());

        if let Err(e) = lines.iter().try_for_each(|l| l.validate(page_number)) {
            self.recover(page_number, e)?;
            return Ok(true);
        }

        let nodes = reconstruct_ocr_page(lines, &self.options.thresholds);
        log::debug!("Page {}: {} nodes", page_number, nodes.len());
        self.append_page(nodes);
        Ok(true)
    }

    /// Push a page whose recorded input could not be read.
    ///
    /// The page is handled like any other malformed page: a placeholder in
    /// lenient mode, an `Error::InputShape` in strict mode.
    pub fn push_unreadable_page(&mut self, page_number: u32, error: &Error) -> Result<bool> {
        if !self.admit(page_number) {
            return Ok(false);
        }

        let reason = match error {
            Error::InputShape { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        self.recover(page_number, Error::input_shape(page_number, reason))?;
        Ok(true)
    }

    /// Finish the document.
    pub fn finish(mut self) -> Document {
        if self.vector_pages > 0 {
            let average = self.vector_chars as f32 / self.vector_pages as f32;
            self.summary.needs_ocr = average < self.options.thresholds.density_floor;
            if self.summary.needs_ocr {
                log::info!(
                    "Average of {:.1} characters per page, OCR recommended",
                    average
                );
            }
        }

        Document {
            nodes: self.nodes,
            summary: self.summary,
        }
    }

    fn admit(&mut self, page_number: u32) -> bool {
        self.summary.pages_total += 1;

        if !self.options.pages.includes(page_number) {
            return false;
        }
        if self.summary.pages_processed >= self.options.max_pages {
            if !self.truncation_logged {
                log::warn!(
                    "Page limit of {} reached, skipping page {} and later",
                    self.options.max_pages,
                    page_number
                );
                self.truncation_logged = true;
            }
            return false;
        }

        self.summary.pages_processed += 1;
        true
    }

    fn recover(&mut self, page_number: u32, error: Error) -> Result<()> {
        if self.options.error_mode == ErrorMode::Strict {
            return Err(error);
        }
        log::warn!("Skipping malformed page {}: {}", page_number, error);
        self.summary.malformed_pages.push(page_number);
        self.append_page(vec![StructuralNode::scan_warning(page_number)]);
        Ok(())
    }

    fn append_page(&mut self, nodes: Vec<StructuralNode>) {
        if nodes.is_empty() {
            return;
        }
        if !self.nodes.is_empty() {
            self.nodes.push(StructuralNode::PageBreak);
        }
        self.nodes.extend(nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PageSelection, QualityPreset};

    fn body_page(text: &str) -> Vec<TextFragment> {
        vec![TextFragment::new(text, 72.0, 700.0, 12.0)]
    }

    const LONG: &str = "This paragraph has comfortably more than sixty characters of body text.";

    #[test]
    fn test_page_breaks_between_pages() {
        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder.push_vector_page(1, &body_page(LONG)).unwrap();
        builder.push_vector_page(2, &body_page(LONG)).unwrap();
        let doc = builder.finish();

        assert_eq!(doc.len(), 3);
        assert!(doc.nodes[1].is_page_break());
        assert!(!doc.needs_ocr());
    }

    #[test]
    fn test_low_density_page() {
        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder.push_vector_page(1, &body_page("tiny")).unwrap();
        let doc = builder.finish();

        assert_eq!(doc.nodes, vec![StructuralNode::scan_warning(1)]);
        assert_eq!(doc.summary.low_density_pages, vec![1]);
        assert!(doc.needs_ocr());
    }

    #[test]
    fn test_empty_ocr_page_adds_no_break() {
        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder
            .push_ocr_page(1, &[OcrLine::new("Hello there", 10.0, 30.0)])
            .unwrap();
        builder.push_ocr_page(2, &[]).unwrap();
        builder
            .push_ocr_page(3, &[OcrLine::new("Third page", 10.0, 30.0)])
            .unwrap();
        let doc = builder.finish();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.summary.pages_processed, 3);
        assert!(!doc.needs_ocr());
        assert_eq!(doc.summary.ocr_dpi, Some(150));
    }

    #[test]
    fn test_ocr_dpi_follows_quality() {
        let options = ReconstructOptions::new().with_quality(QualityPreset::High);
        let mut builder = DocumentBuilder::new(options).unwrap();
        builder
            .push_ocr_page(1, &[OcrLine::new("Scanned words", 10.0, 30.0)])
            .unwrap();
        assert_eq!(builder.finish().summary.ocr_dpi, Some(300));

        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder.push_vector_page(1, &body_page(LONG)).unwrap();
        assert_eq!(builder.finish().summary.ocr_dpi, None);
    }

    #[test]
    fn test_lenient_malformed_page() {
        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder
            .push_ocr_page(1, &[OcrLine::new("Upside down", 40.0, 20.0)])
            .unwrap();
        let doc = builder.finish();

        assert_eq!(doc.nodes, vec![StructuralNode::scan_warning(1)]);
        assert_eq!(doc.summary.malformed_pages, vec![1]);
    }

    #[test]
    fn test_strict_malformed_page() {
        let mut builder = DocumentBuilder::new(ReconstructOptions::new().strict()).unwrap();
        let err = builder
            .push_vector_page(2, &[TextFragment::new("bad", f32::INFINITY, 0.0, 12.0)])
            .unwrap_err();
        assert!(matches!(err, Error::InputShape { page: 2, .. }));
    }

    #[test]
    fn test_unreadable_page() {
        let unreadable = Error::input_shape(2, "missing field `y`");

        let mut builder = DocumentBuilder::new(ReconstructOptions::default()).unwrap();
        builder.push_vector_page(1, &body_page(LONG)).unwrap();
        assert!(builder.push_unreadable_page(2, &unreadable).unwrap());
        let doc = builder.finish();
        assert_eq!(doc.nodes.last(), Some(&StructuralNode::scan_warning(2)));
        assert_eq!(doc.summary.malformed_pages, vec![2]);

        let mut builder = DocumentBuilder::new(ReconstructOptions::new().strict()).unwrap();
        let err = builder.push_unreadable_page(2, &unreadable).unwrap_err();
        assert!(matches!(err, Error::InputShape { page: 2, ref reason } if reason.contains('y')));
    }

    #[test]
    fn test_page_selection_and_limit() {
        let options = ReconstructOptions::new()
            .with_pages(PageSelection::Pages(vec![2, 3, 4]))
            .with_max_pages(2);
        let mut builder = DocumentBuilder::new(options).unwrap();

        assert!(!builder.accepts(1));
        assert!(!builder.push_vector_page(1, &body_page(LONG)).unwrap());
        assert!(builder.push_vector_page(2, &body_page(LONG)).unwrap());
        assert!(builder.push_vector_page(3, &body_page(LONG)).unwrap());
        assert!(!builder.push_vector_page(4, &body_page(LONG)).unwrap());

        let doc = builder.finish();
        assert_eq!(doc.summary.pages_total, 4);
        assert_eq!(doc.summary.pages_processed, 2);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let result = DocumentBuilder::new(ReconstructOptions::new().with_max_pages(5000));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
