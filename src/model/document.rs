//! Document-level types.

use serde::{Deserialize, Serialize};

use super::StructuralNode;

/// A reconstructed document: a flat, page-ordered node sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Structural nodes in page order, then reading order
    pub nodes: Vec<StructuralNode>,

    /// Summary of the conversion run
    pub summary: ConversionSummary,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the caller should retry the document through OCR.
    pub fn needs_ocr(&self) -> bool {
        self.summary.needs_ocr
    }

    /// Split the node sequence into per-page slices at page breaks.
    pub fn pages(&self) -> Vec<&[StructuralNode]> {
        if self.nodes.is_empty() {
            return vec![];
        }
        self.nodes
            .split(|node| node.is_page_break())
            .collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages()
            .into_iter()
            .map(|page| {
                page.iter()
                    .filter_map(|node| node.plain_text())
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Number of pages handed to the engine
    pub pages_total: u32,

    /// Number of pages that went through reconstruction
    pub pages_processed: u32,

    /// Pages whose extracted text fell below the empty-page threshold
    pub low_density_pages: Vec<u32>,

    /// Pages skipped because their input was malformed
    pub malformed_pages: Vec<u32>,

    /// Extracted text density is low enough that OCR is recommended
    pub needs_ocr: bool,

    /// Resolution OCR line boxes were measured at, for OCR runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_dpi: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(doc.pages().is_empty());
        assert!(!doc.needs_ocr());
    }

    #[test]
    fn test_pages_split_on_breaks() {
        let doc = Document {
            nodes: vec![
                StructuralNode::heading(1, "One"),
                StructuralNode::paragraph("Body"),
                StructuralNode::PageBreak,
                StructuralNode::paragraph("Two"),
            ],
            summary: ConversionSummary::default(),
        };

        let pages = doc.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 2);
        assert_eq!(doc.plain_text(), "One\n\nBody\n\nTwo");
    }
}
