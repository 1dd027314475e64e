//! Structural node types.

use serde::{Deserialize, Serialize};

/// A structural element of the reconstructed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuralNode {
    /// A heading (levels 1-3)
    Heading {
        /// Heading level, 1 is the most prominent
        level: u8,
        /// Heading text
        text: String,
    },

    /// A bulleted or numbered list item, marker stripped
    ListItem {
        /// Bullet or numbered
        kind: ListKind,
        /// Item text without its marker
        text: String,
    },

    /// A simple table; every row has at least one cell
    Table {
        /// Rows of cell text
        rows: Vec<Vec<String>>,
    },

    /// A plain paragraph
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Boundary between two pages
    PageBreak,

    /// The page carries too little extractable text and likely needs OCR
    ScanWarning {
        /// 1-indexed page number
        page_number: u32,
    },
}

impl StructuralNode {
    /// Create a heading node. The level is clamped to 1-3.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        StructuralNode::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    /// Create a list item node.
    pub fn list_item(kind: ListKind, text: impl Into<String>) -> Self {
        StructuralNode::ListItem {
            kind,
            text: text.into(),
        }
    }

    /// Create a paragraph node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        StructuralNode::Paragraph { text: text.into() }
    }

    /// Create a table node.
    pub fn table(rows: Vec<Vec<String>>) -> Self {
        StructuralNode::Table { rows }
    }

    /// Create a scan warning for a page.
    pub fn scan_warning(page_number: u32) -> Self {
        StructuralNode::ScanWarning { page_number }
    }

    /// Check if this node is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, StructuralNode::PageBreak)
    }

    /// Check if this node is a scan warning.
    pub fn is_scan_warning(&self) -> bool {
        matches!(self, StructuralNode::ScanWarning { .. })
    }

    /// Check if this node is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, StructuralNode::Table { .. })
    }

    /// Get the text content of this node, if it carries any.
    ///
    /// Table cells are joined with tabs and rows with newlines.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            StructuralNode::Heading { text, .. }
            | StructuralNode::ListItem { text, .. }
            | StructuralNode::Paragraph { text } => Some(text.clone()),
            StructuralNode::Table { rows } => Some(
                rows.iter()
                    .map(|row| row.join("\t"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            StructuralNode::PageBreak | StructuralNode::ScanWarning { .. } => None,
        }
    }
}

/// Kind of list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bullet glyph marker (•, -, –, —, ·, *)
    Bullet,
    /// Numbered, lettered or roman-numeral marker
    Numbered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(
            StructuralNode::heading(7, "Deep"),
            StructuralNode::Heading {
                level: 3,
                text: "Deep".to_string()
            }
        );
        assert_eq!(
            StructuralNode::heading(0, "Top"),
            StructuralNode::Heading {
                level: 1,
                text: "Top".to_string()
            }
        );
    }

    #[test]
    fn test_serde_tagging() {
        let node = StructuralNode::list_item(ListKind::Numbered, "Introduction");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"list_item","kind":"numbered","text":"Introduction"}"#
        );

        let json = serde_json::to_string(&StructuralNode::PageBreak).unwrap();
        assert_eq!(json, r#"{"type":"page_break"}"#);
    }

    #[test]
    fn test_table_plain_text() {
        let table = StructuralNode::table(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ]);
        assert_eq!(table.plain_text().as_deref(), Some("a\tb\nc\td"));
        assert!(StructuralNode::PageBreak.plain_text().is_none());
    }
}
