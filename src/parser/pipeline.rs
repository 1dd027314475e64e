//! Per-page reconstruction pipelines.
//!
//! Vector text: fragments -> lines -> font-size classification -> nodes.
//! OCR text: line boxes -> paragraphs -> text-shape classification -> nodes.

use crate::model::{OcrLine, StructuralNode, TextFragment};

use super::aggregate::BlockAggregator;
use super::classify::{FontSizeClassifier, LineClassifier, TextShapeClassifier};
use super::layout::{assemble_ocr_lines, Line, LineAssembler};
use super::ocr::ParagraphClusterer;
use super::options::LayoutThresholds;

/// Reconstruct one page of vector text.
///
/// Never produces page breaks or scan warnings; those are document-level
/// decisions.
pub fn reconstruct_vector_page(
    fragments: &[TextFragment],
    thresholds: &LayoutThresholds,
    try_tables: bool,
) -> Vec<StructuralNode> {
    let lines = LineAssembler::new(thresholds, try_tables).assemble(fragments);
    let classifier = FontSizeClassifier::for_page(thresholds, &lines);
    aggregate(lines, &classifier, thresholds.min_table_rows)
}

/// Reconstruct one page of OCR line boxes.
pub fn reconstruct_ocr_page(lines: &[OcrLine], thresholds: &LayoutThresholds) -> Vec<StructuralNode> {
    let ordered = assemble_ocr_lines(lines);
    let paragraphs = ParagraphClusterer::new(thresholds).cluster(&ordered);
    let classifier = TextShapeClassifier::new(thresholds);
    aggregate(paragraphs, &classifier, thresholds.min_table_rows)
}

fn aggregate<C: LineClassifier>(
    lines: Vec<Line>,
    classifier: &C,
    min_table_rows: usize,
) -> Vec<StructuralNode> {
    let classes = classifier.classify_all(&lines);
    let mut aggregator = BlockAggregator::new(min_table_rows);
    for (line, class) in lines.into_iter().zip(classes) {
        aggregator.push(line, class);
    }
    aggregator.finish()
}
