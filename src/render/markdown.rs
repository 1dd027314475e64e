//! Markdown rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{Document, ListKind, StructuralNode};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
    /// Number of the next item in the current numbered run
    next_number: u32,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
            next_number: 1,
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.summary.clone(), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        if self.options.collect_stats && !doc.is_empty() {
            self.stats.page_count = 1;
        }

        let mut prev_was_list = false;
        for node in &doc.nodes {
            if self.options.collect_stats {
                self.stats.add_node(node);
            }

            let is_list = matches!(node, StructuralNode::ListItem { .. });
            if prev_was_list && !is_list {
                // Close the list block
                output.push('\n');
            }
            if !matches!(
                node,
                StructuralNode::ListItem {
                    kind: ListKind::Numbered,
                    ..
                }
            ) {
                self.next_number = 1;
            }

            self.render_node(&mut output, node);
            prev_was_list = is_list;
        }

        Ok(output.trim().to_string())
    }

    fn render_node(&mut self, output: &mut String, node: &StructuralNode) {
        match node {
            StructuralNode::Heading { level, text } => {
                let level = (*level).min(self.options.max_heading_level);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            StructuralNode::Paragraph { text } => {
                output.push_str(&self.escape(text));
                output.push_str("\n\n");
            }
            StructuralNode::ListItem { kind, text } => {
                let marker = match kind {
                    ListKind::Bullet => self.options.list_marker.to_string(),
                    ListKind::Numbered => {
                        let marker = format!("{}.", self.next_number);
                        self.next_number += 1;
                        marker
                    }
                };
                output.push_str(&marker);
                output.push(' ');
                output.push_str(&self.escape(text));
                output.push('\n');
            }
            StructuralNode::Table { rows } => self.render_table(output, rows),
            StructuralNode::PageBreak => {
                if self.options.page_break_rule {
                    output.push_str("---\n\n");
                } else if !output.ends_with("\n\n") {
                    output.push_str("\n\n");
                }
            }
            StructuralNode::ScanWarning { page_number } => {
                if self.options.scan_warnings {
                    output.push_str(&format!(
                        "> Page {} contains little or no extractable text and may need OCR.\n\n",
                        page_number
                    ));
                }
            }
        }
    }

    fn render_table(&self, output: &mut String, rows: &[Vec<String>]) {
        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        if col_count == 0 {
            return;
        }

        for (i, row) in rows.iter().enumerate() {
            output.push('|');
            for c in 0..col_count {
                let cell = row.get(c).map(String::as_str).unwrap_or("");
                output.push_str(&format!(" {} |", self.escape(cell.trim())));
            }
            output.push('\n');

            // Separator after header row
            if i == 0 {
                output.push('|');
                for _ in 0..col_count {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only characters that could be misinterpreted as Markdown syntax are
/// escaped, to keep the extracted text readable.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    escape_line_start(result)
}

/// Escape a leading character that would open a block element
/// (heading, quote, list item, setext underline or ordered list).
fn escape_line_start(text: String) -> String {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    let mut rest = text[digits..].chars();
    match (digits, rest.next()) {
        (0, Some('#' | '>' | '+' | '-' | '=')) => format!("\\{}", text),
        (n, Some('.' | ')')) if n > 0 && rest.next().map_or(true, char::is_whitespace) => {
            format!("{}\\{}", &text[..n], &text[n..])
        }
        _ => text,
    }
}
