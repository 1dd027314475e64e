//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{ConversionSummary, StructuralNode};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Conversion summary (copied from source document)
    pub summary: ConversionSummary,

    /// Node statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, summary: ConversionSummary, stats: ExtractionStats) -> Self {
        Self {
            content,
            summary,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics over a document's nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of pages with output
    pub page_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of scan warnings
    pub scan_warning_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a node sequence.
    pub fn from_nodes(nodes: &[StructuralNode]) -> Self {
        let mut stats = Self::new();
        if !nodes.is_empty() {
            stats.page_count = 1;
        }
        for node in nodes {
            stats.add_node(node);
        }
        stats
    }

    /// Count one node.
    pub fn add_node(&mut self, node: &StructuralNode) {
        match node {
            StructuralNode::Heading { .. } => self.heading_count += 1,
            StructuralNode::Paragraph { .. } => self.paragraph_count += 1,
            StructuralNode::ListItem { .. } => self.list_item_count += 1,
            StructuralNode::Table { .. } => self.table_count += 1,
            StructuralNode::ScanWarning { .. } => self.scan_warning_count += 1,
            StructuralNode::PageBreak => self.page_count += 1,
        }
        if let Some(text) = node.plain_text() {
            self.count_text(&text);
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
