//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ListKind, StructuralNode};

    fn sample() -> Document {
        Document {
            nodes: vec![
                StructuralNode::heading(1, "Title"),
                StructuralNode::list_item(ListKind::Numbered, "first"),
                StructuralNode::PageBreak,
                StructuralNode::scan_warning(2),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"type\": \"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains(r#"{"type":"list_item","kind":"numbered","text":"first"}"#));
        assert!(json.contains(r#"{"type":"page_break"}"#));
        assert!(json.contains(r#"{"type":"scan_warning","page_number":2}"#));
    }

    #[test]
    fn test_json_reads_back() {
        let doc = sample();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let parsed: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
