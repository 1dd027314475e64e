//! Page-level layout analysis.

mod aggregate;
mod classify;
mod columns;
mod layout;
mod ocr;
mod options;
mod pipeline;

pub use aggregate::BlockAggregator;
pub use classify::{
    detect_list_marker, has_list_marker, Classification, FontSizeClassifier, LineClassifier,
    TextShapeClassifier,
};
pub use columns::ColumnSplitter;
pub use layout::{
    assemble_ocr_lines, count_chars, normalize_text, FontStatistics, Line, LineAssembler,
};
pub use ocr::ParagraphClusterer;
pub use options::{ErrorMode, LayoutThresholds, ReconstructOptions};
pub use pipeline::{reconstruct_ocr_page, reconstruct_vector_page};
