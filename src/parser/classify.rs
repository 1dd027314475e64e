//! Structural classification of lines.
//!
//! Vector text and OCR text need different heading heuristics: vector text
//! carries a font-size signal, OCR line boxes do not. Both are expressed as
//! [`LineClassifier`] implementations producing the same [`Classification`],
//! so the aggregator never sees path-specific logic. List detection is
//! shared and always runs first.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ListKind;

use super::layout::{FontStatistics, Line};
use super::options::LayoutThresholds;

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<bullet>[•\-–—·*])|(?P<number>\d+[.)\-]|[A-Za-z][.)]|(?i:m{0,3}(?:cm|cd|d?c{0,3})(?:xc|xl|l?x{0,3})(?:ix|iv|v?i{0,3}))[.)]))\s+(?P<rest>\S.*)$",
    )
    .expect("list marker pattern is valid")
});

/// Structural role of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Heading with level 1-3
    Heading {
        /// Heading level
        level: u8,
    },
    /// List item; `text` has the marker stripped
    ListItem {
        /// Bullet or numbered
        kind: ListKind,
        /// Item text
        text: String,
    },
    /// Table-row candidate
    TableRow,
    /// Plain paragraph
    Paragraph,
}

/// Strategy for deciding the structural role of a line.
pub trait LineClassifier {
    /// Classify a single line.
    fn classify(&self, line: &Line) -> Classification;

    /// Classify every line of a page, in order.
    fn classify_all(&self, lines: &[Line]) -> Vec<Classification> {
        lines.iter().map(|line| self.classify(line)).collect()
    }
}

/// Detect a leading list marker.
///
/// Returns the list kind and the text with the marker stripped.
pub fn detect_list_marker(text: &str) -> Option<(ListKind, String)> {
    let caps = LIST_MARKER.captures(text.trim())?;
    let kind = match caps.name("number") {
        // The numeral pattern can match nothing, leaving a bare "." or ")"
        Some(number) if number.len() < 2 => return None,
        Some(_) => ListKind::Numbered,
        None => ListKind::Bullet,
    };
    let rest = caps.name("rest")?.as_str().trim();
    Some((kind, rest.to_string()))
}

/// Check if text starts with a list marker.
pub fn has_list_marker(text: &str) -> bool {
    detect_list_marker(text).is_some()
}

/// Heading detection from font-size ratios to the page median (vector text).
#[derive(Debug, Clone)]
pub struct FontSizeClassifier {
    stats: FontStatistics,
    h1_ratio: f32,
    h2_ratio: f32,
    h3_ratio: f32,
    max_heading_chars: usize,
}

impl FontSizeClassifier {
    /// Create a classifier for one page.
    pub fn new(thresholds: &LayoutThresholds, stats: FontStatistics) -> Self {
        Self {
            stats,
            h1_ratio: thresholds.h1_ratio,
            h2_ratio: thresholds.h2_ratio,
            h3_ratio: thresholds.h3_ratio,
            max_heading_chars: thresholds.max_heading_chars,
        }
    }

    /// Create a classifier with statistics measured from the page's lines.
    pub fn for_page(thresholds: &LayoutThresholds, lines: &[Line]) -> Self {
        Self::new(thresholds, FontStatistics::from_lines(lines))
    }

    /// Get heading level for a line (0 for body text).
    pub fn heading_level(&self, line: &Line) -> u8 {
        if line.char_len() > self.max_heading_chars {
            return 0;
        }

        let ratio = self.stats.ratio(line.font_size);
        if ratio > self.h1_ratio {
            1
        } else if ratio > self.h2_ratio {
            2
        } else if ratio > self.h3_ratio {
            3
        } else {
            0
        }
    }
}

impl LineClassifier for FontSizeClassifier {
    fn classify(&self, line: &Line) -> Classification {
        if let Some((kind, text)) = detect_list_marker(&line.text) {
            return Classification::ListItem { kind, text };
        }

        let level = self.heading_level(line);
        if level > 0 {
            return Classification::Heading { level };
        }

        if line.is_table_candidate() {
            return Classification::TableRow;
        }

        Classification::Paragraph
    }
}

/// Heading detection from text shape (OCR text).
///
/// Short lines that are mostly uppercase become level-1 headings; short
/// lines ending in a colon become level-2 headings.
#[derive(Debug, Clone)]
pub struct TextShapeClassifier {
    max_heading_chars: usize,
    uppercase_ratio: f32,
}

impl TextShapeClassifier {
    /// Create a classifier from layout thresholds.
    pub fn new(thresholds: &LayoutThresholds) -> Self {
        Self {
            max_heading_chars: thresholds.ocr_max_heading_chars,
            uppercase_ratio: thresholds.ocr_uppercase_ratio,
        }
    }

    /// Get heading level for a line (0 for body text).
    pub fn heading_level(&self, text: &str) -> u8 {
        if text.chars().count() > self.max_heading_chars {
            return 0;
        }

        let (letters, upper) = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(n, up), c| {
                (n + 1, up + usize::from(c.is_uppercase()))
            });

        if letters >= 2 && upper as f32 / letters as f32 >= self.uppercase_ratio {
            1
        } else if text.ends_with(':') {
            2
        } else {
            0
        }
    }
}

impl LineClassifier for TextShapeClassifier {
    fn classify(&self, line: &Line) -> Classification {
        if let Some((kind, text)) = detect_list_marker(&line.text) {
            return Classification::ListItem { kind, text };
        }

        match self.heading_level(&line.text) {
            0 => Classification::Paragraph,
            level => Classification::Heading { level },
        }
    }
}
