//! Plain text rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, ListKind, StructuralNode};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// List items keep a marker so lists stay recognizable; tables are
/// tab-separated. Page breaks become form feeds.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut blocks: Vec<String> = Vec::with_capacity(doc.nodes.len());
    let mut number = 0u32;

    for node in &doc.nodes {
        if !matches!(
            node,
            StructuralNode::ListItem {
                kind: ListKind::Numbered,
                ..
            }
        ) {
            number = 0;
        }

        match node {
            StructuralNode::ListItem { kind, text } => {
                let marker = match kind {
                    ListKind::Bullet => options.list_marker.to_string(),
                    ListKind::Numbered => {
                        number += 1;
                        format!("{}.", number)
                    }
                };
                blocks.push(format!("{} {}", marker, text));
            }
            StructuralNode::PageBreak => blocks.push("\u{000C}".to_string()),
            StructuralNode::ScanWarning { page_number } => {
                if options.scan_warnings {
                    blocks.push(format!("[page {} needs OCR]", page_number));
                }
            }
            other => blocks.extend(other.plain_text()),
        }
    }

    Ok(blocks.join("\n\n").trim().to_string())
}
