//! Paragraph clustering for OCR line boxes.
//!
//! OCR output has one box per printed line. Consecutive boxes are merged
//! into paragraphs by vertical gap before classification, measured against
//! the median line height of the page.

use crate::model::OcrLine;

use super::classify::has_list_marker;
use super::layout::{lower_median, Line};
use super::options::LayoutThresholds;

/// Clusters OCR lines into paragraphs by vertical gap.
#[derive(Debug, Clone)]
pub struct ParagraphClusterer {
    gap_factor: f32,
    height_sample: usize,
}

impl ParagraphClusterer {
    /// Create a clusterer from layout thresholds.
    pub fn new(thresholds: &LayoutThresholds) -> Self {
        Self {
            gap_factor: thresholds.ocr_gap_factor,
            height_sample: thresholds.ocr_height_sample.max(1),
        }
    }

    /// Gap above which a new paragraph starts.
    pub fn gap_threshold(&self, lines: &[OcrLine]) -> f32 {
        let mut heights: Vec<f32> = lines
            .iter()
            .take(self.height_sample)
            .map(|l| l.height())
            .collect();
        lower_median(&mut heights).unwrap_or(0.0) * self.gap_factor
    }

    /// Merge top-to-bottom ordered lines into paragraph lines.
    ///
    /// A line opening with a list marker always starts a new paragraph so
    /// stacked list items stay separate.
    pub fn cluster(&self, lines: &[OcrLine]) -> Vec<Line> {
        if lines.is_empty() {
            return vec![];
        }

        let threshold = self.gap_threshold(lines);
        let mut paragraphs = Vec::new();
        let mut buffer: Vec<&OcrLine> = Vec::new();

        for line in lines {
            if let Some(prev) = buffer.last() {
                let gap = line.bbox_top - prev.bbox_bottom;
                if gap > threshold || has_list_marker(&line.text) {
                    paragraphs.push(paragraph_line(&buffer));
                    buffer.clear();
                }
            }
            buffer.push(line);
        }

        if !buffer.is_empty() {
            paragraphs.push(paragraph_line(&buffer));
        }

        log::debug!(
            "ParagraphClusterer: {} lines -> {} paragraphs (gap threshold {:.1})",
            lines.len(),
            paragraphs.len(),
            threshold
        );

        paragraphs
    }
}

fn paragraph_line(buffer: &[&OcrLine]) -> Line {
    let text = buffer
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut heights: Vec<f32> = buffer.iter().map(|l| l.height()).collect();
    let height = lower_median(&mut heights).unwrap_or(0.0);
    let top = buffer.first().map(|l| l.bbox_top).unwrap_or(0.0);
    Line::new(text, top, height)
}
