//! Page input types produced by the rendering and OCR collaborators.
//!
//! Both inputs are ephemeral: one page's worth is consumed by a single
//! reconstruction pass. Loaders are provided for replaying recorded
//! collaborator output stored as JSON (`[[fragment, ...], ...]`, one inner
//! array per page).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// A positioned run of text from a PDF content stream.
///
/// Coordinates are in PDF user space, so `y` grows toward the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Font size proxy derived from the text rendering transform
    #[serde(alias = "fontSizeProxy")]
    pub font_size: f32,
    /// Advance width of the run, when the extractor reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl TextFragment {
    /// Create a new fragment without a known width.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            width: None,
        }
    }

    /// Set the advance width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Right edge of the run.
    ///
    /// Falls back to `chars * font_size * char_width_factor` when the
    /// extractor did not report a width.
    pub fn right_edge(&self, char_width_factor: f32) -> f32 {
        match self.width {
            Some(width) if width > 0.0 => self.x + width,
            _ => {
                let chars = self.text.trim_end().chars().count() as f32;
                self.x + chars * self.font_size * char_width_factor
            }
        }
    }

    /// Check the fragment's geometry.
    pub(crate) fn validate(&self, page: u32) -> Result<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(Error::input_shape(
                page,
                format!("fragment {:?} has a non-finite position", self.text),
            ));
        }
        if !self.font_size.is_finite() || self.font_size < 0.0 {
            return Err(Error::input_shape(
                page,
                format!(
                    "fragment {:?} has invalid font size {}",
                    self.text, self.font_size
                ),
            ));
        }
        if let Some(width) = self.width {
            if !width.is_finite() {
                return Err(Error::input_shape(
                    page,
                    format!("fragment {:?} has a non-finite width", self.text),
                ));
            }
        }
        Ok(())
    }
}

/// A single line box recognized by an OCR engine.
///
/// Coordinates are in image space, so `bbox_top <= bbox_bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrLine {
    /// Recognized text
    pub text: String,
    /// Top edge of the bounding box
    #[serde(alias = "bboxTop")]
    pub bbox_top: f32,
    /// Bottom edge of the bounding box
    #[serde(alias = "bboxBottom")]
    pub bbox_bottom: f32,
}

impl OcrLine {
    /// Create a new OCR line box.
    pub fn new(text: impl Into<String>, bbox_top: f32, bbox_bottom: f32) -> Self {
        Self {
            text: text.into(),
            bbox_top,
            bbox_bottom,
        }
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.bbox_bottom - self.bbox_top
    }

    /// Check the box geometry.
    pub(crate) fn validate(&self, page: u32) -> Result<()> {
        if !self.bbox_top.is_finite() || !self.bbox_bottom.is_finite() {
            return Err(Error::input_shape(
                page,
                format!("line box {:?} has non-finite coordinates", self.text),
            ));
        }
        if self.bbox_bottom < self.bbox_top {
            return Err(Error::input_shape(
                page,
                format!(
                    "line box {:?} is inverted (top {} below bottom {})",
                    self.text, self.bbox_top, self.bbox_bottom
                ),
            ));
        }
        Ok(())
    }
}

/// One recorded page: its input, or why the page could not be read.
pub type RecordedPage<T> = Result<Vec<T>>;

/// Parse recorded vector-text pages from a JSON string.
///
/// Only a file that is not a JSON array fails as a whole. A page whose
/// fragments do not deserialize becomes an `Error::InputShape` entry so
/// the remaining pages still reconstruct.
pub fn vector_pages_from_json(json: &str) -> Result<Vec<RecordedPage<TextFragment>>> {
    pages_from_json(json)
}

/// Parse recorded OCR pages from a JSON string.
pub fn ocr_pages_from_json(json: &str) -> Result<Vec<RecordedPage<OcrLine>>> {
    pages_from_json(json)
}

/// Load recorded vector-text pages from a JSON file.
pub fn load_vector_pages<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedPage<TextFragment>>> {
    let json = fs::read_to_string(path)?;
    vector_pages_from_json(&json)
}

/// Load recorded OCR pages from a JSON file.
pub fn load_ocr_pages<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedPage<OcrLine>>> {
    let json = fs::read_to_string(path)?;
    ocr_pages_from_json(&json)
}

fn pages_from_json<T: DeserializeOwned>(json: &str) -> Result<Vec<RecordedPage<T>>> {
    let pages: Vec<Value> = serde_json::from_str(json)?;
    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(index, page)| {
            serde_json::from_value(page)
                .map_err(|e| Error::input_shape(index as u32 + 1, e.to_string()))
        })
        .collect())
}
