//! Column splitting for table-row detection.
//!
//! A line whose fragments are separated by wide horizontal gaps is split
//! into column segments. Lines yielding a moderate number of segments are
//! table-row candidates; the aggregator confirms them once a following
//! similar row shows up.

use crate::model::TextFragment;

use super::layout::normalize_text;
use super::options::LayoutThresholds;

/// Splits a line's fragments into columns at wide horizontal gaps.
#[derive(Debug, Clone)]
pub struct ColumnSplitter {
    /// Minimum gap between columns (page units)
    column_gap: f32,
    /// Glyph width estimate for fragments without a reported width
    char_width_factor: f32,
    /// Minimum number of columns for a table row
    min_columns: usize,
    /// Maximum number of columns (above this, likely mis-segmented prose)
    max_columns: usize,
}

impl ColumnSplitter {
    /// Create a splitter from layout thresholds.
    pub fn new(thresholds: &LayoutThresholds) -> Self {
        Self {
            column_gap: thresholds.column_gap,
            char_width_factor: thresholds.char_width_factor,
            min_columns: thresholds.min_table_columns,
            max_columns: thresholds.max_table_columns,
        }
    }

    /// Split x-sorted fragments into non-empty column segments.
    pub fn split(&self, fragments: &[&TextFragment]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut prev_right: Option<f32> = None;

        for frag in fragments {
            if let Some(right) = prev_right {
                if frag.x - right > self.column_gap {
                    columns.push(normalize_text(&buffer.join(" ")));
                    buffer.clear();
                }
            }
            buffer.push(&frag.text);
            prev_right = Some(frag.right_edge(self.char_width_factor));
        }

        if !buffer.is_empty() {
            columns.push(normalize_text(&buffer.join(" ")));
        }

        columns.retain(|c| !c.is_empty());
        columns
    }

    /// Check if a column count makes a table-row candidate.
    pub fn is_table_row(&self, column_count: usize) -> bool {
        (self.min_columns..=self.max_columns).contains(&column_count)
    }

    /// Split a line and keep the columns only when it is a table-row candidate.
    pub fn table_columns(&self, fragments: &[&TextFragment]) -> Vec<String> {
        let columns = self.split(fragments);
        if self.is_table_row(columns.len()) {
            columns
        } else {
            if columns.len() > self.max_columns {
                log::debug!(
                    "ColumnSplitter: {} columns exceeds max {}, treating as prose",
                    columns.len(),
                    self.max_columns
                );
            }
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> ColumnSplitter {
        ColumnSplitter::new(&LayoutThresholds::default())
    }

    #[test]
    fn test_split_on_wide_gaps() {
        let frags = [
            TextFragment::new("Item", 72.0, 700.0, 10.0).with_width(20.0),
            TextFragment::new("Unit", 100.0, 700.0, 10.0).with_width(20.0),
            TextFragment::new("price", 200.0, 700.0, 10.0).with_width(25.0),
            TextFragment::new("Total", 300.0, 700.0, 10.0).with_width(25.0),
        ];
        let refs: Vec<&TextFragment> = frags.iter().collect();

        assert_eq!(splitter().split(&refs), vec!["Item Unit", "price", "Total"]);
    }

    #[test]
    fn test_gap_exactly_at_threshold_does_not_split() {
        let frags = [
            TextFragment::new("left", 0.0, 0.0, 10.0).with_width(20.0),
            TextFragment::new("right", 60.0, 0.0, 10.0).with_width(20.0),
        ];
        let refs: Vec<&TextFragment> = frags.iter().collect();

        assert_eq!(splitter().split(&refs), vec!["left right"]);
    }

    #[test]
    fn test_candidate_range() {
        let s = splitter();
        assert!(!s.is_table_row(1));
        assert!(s.is_table_row(2));
        assert!(s.is_table_row(6));
        assert!(!s.is_table_row(7));
    }

    #[test]
    fn test_too_many_columns_rejected() {
        let frags: Vec<TextFragment> = (0..7)
            .map(|i| TextFragment::new("w", i as f32 * 100.0, 0.0, 10.0))
            .collect();
        let refs: Vec<&TextFragment> = frags.iter().collect();

        assert_eq!(splitter().split(&refs).len(), 7);
        assert!(splitter().table_columns(&refs).is_empty());
    }
}
