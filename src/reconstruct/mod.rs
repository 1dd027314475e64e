//! Document-level reconstruction runs.
//!
//! [`Reconstructor`] drives a [`DocumentBuilder`] over all pages of a
//! conversion, reporting progress after each page and honoring a
//! cancellation flag between pages.

mod builder;

pub use builder::DocumentBuilder;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::error::{Error, Result};
use crate::model::{Document, OcrLine, RecordedPage, TextFragment};
use crate::parser::ReconstructOptions;

/// Progress report sent after each processed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-indexed number of the page just processed
    pub page_number: u32,
    /// Pages processed so far
    pub completed: u32,
    /// Pages that will be processed in total
    pub total: u32,
}

/// Shared cancellation flag, checked between pages.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs reconstruction over a whole document.
///
/// # Example
///
/// ```
/// use relayout::{Reconstructor, ReconstructOptions, OcrLine};
///
/// let (tx, rx) = crossbeam_channel::unbounded();
/// let pages = vec![vec![OcrLine::new("SECTION ONE", 100.0, 120.0)]];
/// let doc = Reconstructor::new(ReconstructOptions::default())?
///     .with_progress(tx)
///     .ocr(&pages)?;
///
/// assert_eq!(doc.len(), 1);
/// assert_eq!(rx.try_iter().count(), 1);
/// # Ok::<(), relayout::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Reconstructor {
    options: ReconstructOptions,
    progress: Option<Sender<PageProgress>>,
    cancel: Option<CancelToken>,
}

impl Reconstructor {
    /// Create a reconstructor, rejecting invalid options.
    pub fn new(options: ReconstructOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            progress: None,
            cancel: None,
        })
    }

    /// Send a [`PageProgress`] after each processed page.
    pub fn with_progress(mut self, sender: Sender<PageProgress>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Stop between pages once the token is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of pages out of `page_count` inputs that will be processed.
    pub fn planned_pages(&self, page_count: usize) -> u32 {
        let selected = (1..=page_count as u32)
            .filter(|n| self.options.pages.includes(*n))
            .count() as u32;
        selected.min(self.options.max_pages)
    }

    /// Reconstruct a document from vector-text pages.
    pub fn vector_text(&self, pages: &[Vec<TextFragment>]) -> Result<Document> {
        self.run(pages, |builder, number, page| {
            builder.push_vector_page(number, page)
        })
    }

    /// Reconstruct a document from OCR pages.
    pub fn ocr(&self, pages: &[Vec<OcrLine>]) -> Result<Document> {
        self.run(pages, |builder, number, page| builder.push_ocr_page(number, page))
    }

    /// Reconstruct a document from recorded vector-text pages.
    ///
    /// Pages that failed to load go through malformed-page handling.
    pub fn vector_records(&self, pages: &[RecordedPage<TextFragment>]) -> Result<Document> {
        self.run(pages, |builder, number, page| match page {
            Ok(fragments) => builder.push_vector_page(number, fragments),
            Err(e) => builder.push_unreadable_page(number, e),
        })
    }

    /// Reconstruct a document from recorded OCR pages.
    pub fn ocr_records(&self, pages: &[RecordedPage<OcrLine>]) -> Result<Document> {
        self.run(pages, |builder, number, page| match page {
            Ok(lines) => builder.push_ocr_page(number, lines),
            Err(e) => builder.push_unreadable_page(number, e),
        })
    }

    fn run<T, F>(&self, pages: &[T], mut push: F) -> Result<Document>
    where
        F: FnMut(&mut DocumentBuilder, u32, &T) -> Result<bool>,
    {
        let mut builder = DocumentBuilder::new(self.options.clone())?;
        let total = self.planned_pages(pages.len());

        for (index, page) in pages.iter().enumerate() {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                let completed = builder.pages_processed();
                log::info!("Reconstruction cancelled after {} page(s)", completed);
                return Err(Error::Cancelled { completed });
            }

            let page_number = index as u32 + 1;
            if push(&mut builder, page_number, page)? {
                if let Some(tx) = &self.progress {
                    // A dropped receiver only means nobody is watching
                    let _ = tx.send(PageProgress {
                        page_number,
                        completed: builder.pages_processed(),
                        total,
                    });
                }
            }
        }

        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PageSelection;

    fn ocr_pages(n: usize) -> Vec<Vec<OcrLine>> {
        (0..n)
            .map(|i| vec![OcrLine::new(format!("Page {} text", i + 1), 10.0, 30.0)])
            .collect()
    }

    #[test]
    fn test_progress_reports() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let doc = Reconstructor::new(ReconstructOptions::default())
            .unwrap()
            .with_progress(tx)
            .ocr(&ocr_pages(3))
            .unwrap();

        let reports: Vec<PageProgress> = rx.try_iter().collect();
        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports[2],
            PageProgress {
                page_number: 3,
                completed: 3,
                total: 3
            }
        );
        assert_eq!(doc.pages().len(), 3);
    }

    #[test]
    fn test_progress_skips_unselected_pages() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let options = ReconstructOptions::new().with_pages(PageSelection::Range(2..=3));
        let reconstructor = Reconstructor::new(options).unwrap().with_progress(tx);

        assert_eq!(reconstructor.planned_pages(5), 2);
        reconstructor.ocr(&ocr_pages(5)).unwrap();

        let pages: Vec<u32> = rx.try_iter().map(|p| p.page_number).collect();
        assert_eq!(pages, vec![2, 3]);
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();

        let err = Reconstructor::new(ReconstructOptions::default())
            .unwrap()
            .with_cancel_token(token)
            .ocr(&ocr_pages(2))
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled { completed: 0 }));
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);

        let doc = Reconstructor::new(ReconstructOptions::default())
            .unwrap()
            .with_progress(tx)
            .ocr(&ocr_pages(2))
            .unwrap();
        assert_eq!(doc.summary.pages_processed, 2);
    }

    #[test]
    fn test_invalid_options() {
        let result = Reconstructor::new(ReconstructOptions::new().with_max_pages(0));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
