//! Reconstruction options and layout thresholds.

use crate::error::{Error, Result};
use crate::policy::{check_max_pages, PageSelection, QualityPreset, DEFAULT_MAX_PAGES};

/// Options for reconstructing a document.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Split vector-text lines into columns and aggregate table rows
    pub try_tables: bool,

    /// Maximum number of pages processed (1..=`MAX_PAGES_LIMIT`)
    pub max_pages: u32,

    /// Page selection (which pages to process)
    pub pages: PageSelection,

    /// How malformed page input is handled
    pub error_mode: ErrorMode,

    /// Render quality the OCR input was produced at
    pub quality: QualityPreset,

    /// Layout heuristics
    pub thresholds: LayoutThresholds,
}

impl ReconstructOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, try_tables: bool) -> Self {
        self.try_tables = try_tables;
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole run on the first malformed page.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the OCR render quality.
    pub fn with_quality(mut self, quality: QualityPreset) -> Self {
        self.quality = quality;
        self
    }

    /// Set layout thresholds.
    pub fn with_thresholds(mut self, thresholds: LayoutThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Reject out-of-range options before any page is processed.
    pub fn validate(&self) -> Result<()> {
        check_max_pages(self.max_pages)?;
        self.quality.validate()?;
        self.thresholds.validate()
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            try_tables: true,
            max_pages: DEFAULT_MAX_PAGES,
            pages: PageSelection::All,
            error_mode: ErrorMode::Lenient,
            quality: QualityPreset::Standard,
            thresholds: LayoutThresholds::default(),
        }
    }
}

/// Error handling mode for malformed page input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the run
    Strict,
    /// Replace the page with a scan warning and continue
    #[default]
    Lenient,
}

/// Empirical layout thresholds.
///
/// The defaults are tuned on typical office documents; they are starting
/// points rather than guaranteed-correct values, and real-world PDFs vary
/// widely in base font size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutThresholds {
    /// Max baseline distance for fragments on the same line (page units)
    pub line_y_tolerance: f32,

    /// Min horizontal gap that starts a new column (page units)
    pub column_gap: f32,

    /// Estimated glyph width as a fraction of font size, for fragments without width
    pub char_width_factor: f32,

    /// Fewest columns for a table-row candidate
    pub min_table_columns: usize,

    /// Most columns for a table-row candidate
    pub max_table_columns: usize,

    /// Fewest buffered rows emitted as a table
    pub min_table_rows: usize,

    /// Font-size ratio to page median above which a line is an H1
    pub h1_ratio: f32,

    /// Font-size ratio above which a line is an H2
    pub h2_ratio: f32,

    /// Font-size ratio above which a line is an H3
    pub h3_ratio: f32,

    /// Longest vector-text line still eligible as a heading (characters)
    pub max_heading_chars: usize,

    /// Longest OCR paragraph still eligible as a heading (characters)
    pub ocr_max_heading_chars: usize,

    /// Share of uppercase letters for an OCR heading
    pub ocr_uppercase_ratio: f32,

    /// Paragraph gap threshold as a fraction of median OCR line height
    pub ocr_gap_factor: f32,

    /// Number of leading OCR lines sampled for the median line height
    pub ocr_height_sample: usize,

    /// Pages with fewer non-whitespace characters get a scan warning
    pub empty_page_chars: usize,

    /// Document average characters per page below which OCR is recommended
    pub density_floor: f32,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            line_y_tolerance: 2.5,
            column_gap: 40.0,
            char_width_factor: 0.5,
            min_table_columns: 2,
            max_table_columns: 6,
            min_table_rows: 2,
            h1_ratio: 1.8,
            h2_ratio: 1.45,
            h3_ratio: 1.25,
            max_heading_chars: 80,
            ocr_max_heading_chars: 60,
            ocr_uppercase_ratio: 0.75,
            ocr_gap_factor: 0.9,
            ocr_height_sample: 10,
            empty_page_chars: 15,
            density_floor: 60.0,
        }
    }
}

impl LayoutThresholds {
    /// Check the thresholds for consistency.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("line_y_tolerance", self.line_y_tolerance),
            ("column_gap", self.column_gap),
            ("char_width_factor", self.char_width_factor),
            ("ocr_gap_factor", self.ocr_gap_factor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !(self.h1_ratio >= self.h2_ratio && self.h2_ratio >= self.h3_ratio && self.h3_ratio > 1.0)
        {
            return Err(Error::config(format!(
                "heading ratios must satisfy h1 >= h2 >= h3 > 1.0, got {}/{}/{}",
                self.h1_ratio, self.h2_ratio, self.h3_ratio
            )));
        }

        if self.min_table_columns < 2 || self.min_table_columns > self.max_table_columns {
            return Err(Error::config(format!(
                "table column bounds must satisfy 2 <= min <= max, got {}..={}",
                self.min_table_columns, self.max_table_columns
            )));
        }

        if self.min_table_rows < 2 {
            return Err(Error::config("min_table_rows must be at least 2"));
        }

        if !(0.0..=1.0).contains(&self.ocr_uppercase_ratio) {
            return Err(Error::config(format!(
                "ocr_uppercase_ratio must be within 0.0..=1.0, got {}",
                self.ocr_uppercase_ratio
            )));
        }

        if self.ocr_height_sample == 0 {
            return Err(Error::config("ocr_height_sample must be at least 1"));
        }

        if !self.density_floor.is_finite() || self.density_floor < 0.0 {
            return Err(Error::config("density_floor must be non-negative"));
        }

        Ok(())
    }
}
