//! Aggregation of classified lines into structural nodes.

use crate::model::StructuralNode;

use super::classify::Classification;
use super::layout::Line;

/// Turns classified lines into a flat node sequence for one page.
///
/// Table-row candidates are buffered until a non-candidate line (or the end
/// of the page) flushes them: two or more rows become a table, a single row
/// is more likely an accidental column split and becomes a paragraph.
#[derive(Debug)]
pub struct BlockAggregator {
    min_table_rows: usize,
    pending_rows: Vec<Vec<String>>,
    nodes: Vec<StructuralNode>,
}

impl BlockAggregator {
    /// Create an aggregator that needs `min_table_rows` rows for a table.
    pub fn new(min_table_rows: usize) -> Self {
        Self {
            min_table_rows: min_table_rows.max(2),
            pending_rows: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Add one classified line.
    pub fn push(&mut self, line: Line, class: Classification) {
        match class {
            Classification::TableRow => {
                self.pending_rows.push(line.columns);
            }
            Classification::Heading { level } => {
                self.flush_table();
                self.nodes.push(StructuralNode::heading(level, line.text));
            }
            Classification::ListItem { kind, text } => {
                self.flush_table();
                self.nodes.push(StructuralNode::list_item(kind, text));
            }
            Classification::Paragraph => {
                self.flush_table();
                self.nodes.push(StructuralNode::paragraph(line.text));
            }
        }
    }

    /// Flush pending rows and return the page's nodes.
    pub fn finish(mut self) -> Vec<StructuralNode> {
        self.flush_table();
        self.nodes
    }

    fn flush_table(&mut self) {
        match self.pending_rows.len() {
            0 => {}
            1 => {
                let row = self.pending_rows.remove(0);
                self.nodes.push(StructuralNode::paragraph(row.join(" ")));
            }
            n if n >= self.min_table_rows => {
                log::debug!("BlockAggregator: emitting table with {} rows", n);
                let rows = std::mem::take(&mut self.pending_rows);
                self.nodes.push(StructuralNode::table(rows));
            }
            _ => {
                // Fewer rows than a custom minimum: keep each row as text
                for row in std::mem::take(&mut self.pending_rows) {
                    self.nodes.push(StructuralNode::paragraph(row.join(" ")));
                }
            }
        }
    }
}
