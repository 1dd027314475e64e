//! Line assembly for vector-text and OCR page input.
//!
//! Vector fragments sharing a baseline are grouped into lines in reading
//! order (top to bottom, left to right). OCR line boxes already represent
//! single lines and only need normalizing and ordering.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::model::{OcrLine, TextFragment};

use super::columns::ColumnSplitter;
use super::options::LayoutThresholds;

/// A line of text, the unit the structural classifier works on.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Whitespace-normalized, non-empty text
    pub text: String,
    /// Y position (baseline for vector text, box top for OCR)
    pub y: f32,
    /// Dominant font size of the line
    pub font_size: f32,
    /// Column segments; non-empty only for table-row candidates
    pub columns: Vec<String>,
}

impl Line {
    /// Create a line without columns.
    pub fn new(text: impl Into<String>, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            y,
            font_size,
            columns: Vec::new(),
        }
    }

    /// Attach column segments.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Check if the line is a table-row candidate.
    pub fn is_table_candidate(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Font statistics for heading detection on one page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FontStatistics {
    /// Median line font size (body text)
    pub body_size: f32,
}

impl FontStatistics {
    /// Compute the page median over each line's dominant font size.
    ///
    /// With an even number of lines the lower of the two middle values is
    /// used, so a page with one heading and one body line measures against
    /// the body size.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut sizes: Vec<f32> = lines
            .iter()
            .map(|l| l.font_size)
            .filter(|s| *s > 0.0)
            .collect();
        Self {
            body_size: lower_median(&mut sizes).unwrap_or(0.0),
        }
    }

    /// Ratio of a font size to the body size (1.0 when unknown).
    pub fn ratio(&self, font_size: f32) -> f32 {
        if self.body_size > 0.0 {
            font_size / self.body_size
        } else {
            1.0
        }
    }
}

/// Groups positioned fragments into lines.
pub struct LineAssembler {
    y_tolerance: f32,
    columns: Option<ColumnSplitter>,
}

impl LineAssembler {
    /// Create an assembler; column splitting runs only when `split_columns` is set.
    pub fn new(thresholds: &LayoutThresholds, split_columns: bool) -> Self {
        Self {
            y_tolerance: thresholds.line_y_tolerance,
            columns: split_columns.then(|| ColumnSplitter::new(thresholds)),
        }
    }

    /// Group vector fragments into lines in reading order.
    pub fn assemble(&self, fragments: &[TextFragment]) -> Vec<Line> {
        let mut sorted: Vec<&TextFragment> = fragments
            .iter()
            .filter(|f| !f.text.trim().is_empty())
            .collect();
        if sorted.is_empty() {
            return vec![];
        }

        // PDF y grows upward: descending y is top to bottom
        sorted.sort_by(|a, b| {
            let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal);
            if y_cmp == Ordering::Equal {
                a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
            } else {
                y_cmp
            }
        });

        let mut lines = Vec::new();
        let mut current: Vec<&TextFragment> = Vec::new();
        let mut current_y: Option<f32> = None;

        for frag in sorted {
            match current_y {
                Some(y) if (frag.y - y).abs() <= self.y_tolerance => current.push(frag),
                _ => {
                    if !current.is_empty() {
                        lines.extend(self.build_line(std::mem::take(&mut current)));
                    }
                    current_y = Some(frag.y);
                    current.push(frag);
                }
            }
        }

        if !current.is_empty() {
            lines.extend(self.build_line(current));
        }

        log::debug!(
            "LineAssembler: {} fragments -> {} lines",
            fragments.len(),
            lines.len()
        );

        lines
    }

    fn build_line(&self, mut fragments: Vec<&TextFragment>) -> Option<Line> {
        fragments.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

        let text = normalize_text(
            &fragments
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );
        if text.is_empty() {
            return None;
        }

        let mut sizes: Vec<f32> = fragments.iter().map(|f| f.font_size).collect();
        let font_size = lower_median(&mut sizes).unwrap_or(0.0);
        let y = fragments[0].y;

        let columns = self
            .columns
            .as_ref()
            .map(|splitter| splitter.table_columns(&fragments))
            .unwrap_or_default();

        Some(Line {
            text,
            y,
            font_size,
            columns,
        })
    }
}

/// Normalize OCR line boxes: clean text, drop empty boxes, order top to bottom.
pub fn assemble_ocr_lines(lines: &[OcrLine]) -> Vec<OcrLine> {
    let mut normalized: Vec<OcrLine> = lines
        .iter()
        .filter_map(|line| {
            let text = normalize_text(&line.text);
            (!text.is_empty()).then(|| OcrLine {
                text,
                bbox_top: line.bbox_top,
                bbox_bottom: line.bbox_bottom,
            })
        })
        .collect();

    normalized.sort_by(|a, b| {
        a.bbox_top
            .partial_cmp(&b.bbox_top)
            .unwrap_or(Ordering::Equal)
    });
    normalized
}

/// NFC-normalize text, trim it and collapse internal whitespace and newlines.
pub fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count non-whitespace characters across a page's fragments.
pub fn count_chars(fragments: &[TextFragment]) -> usize {
    fragments
        .iter()
        .map(|f| f.text.chars().filter(|c| !c.is_whitespace()).count())
        .sum()
}

/// Lower median of a slice (sorts in place).
pub(crate) fn lower_median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(values[(values.len() - 1) / 2])
}
