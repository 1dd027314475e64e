//! Guardrail policy: page limits, page selection and OCR render quality.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound accepted for `max_pages`.
pub const MAX_PAGES_LIMIT: u32 = 1000;

/// Default number of pages processed per conversion.
pub const DEFAULT_MAX_PAGES: u32 = 200;

/// Resolution PDF user space is defined at.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Check a `max_pages` value against the allowed bound.
pub fn check_max_pages(max_pages: u32) -> Result<()> {
    if max_pages == 0 || max_pages > MAX_PAGES_LIMIT {
        return Err(Error::config(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_LIMIT, max_pages
        )));
    }
    Ok(())
}

/// Quality preset for rasterizing pages ahead of OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    /// 100 DPI, fastest recognition
    Draft,
    /// 150 DPI
    #[default]
    Standard,
    /// 300 DPI, best for small print
    High,
    /// Explicit resolution (72-600 DPI)
    Custom(u32),
}

impl QualityPreset {
    /// Lowest accepted custom resolution.
    pub const MIN_DPI: u32 = 72;
    /// Highest accepted custom resolution.
    pub const MAX_DPI: u32 = 600;

    /// Resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        match self {
            QualityPreset::Draft => 100,
            QualityPreset::Standard => 150,
            QualityPreset::High => 300,
            QualityPreset::Custom(dpi) => *dpi,
        }
    }

    /// Scale factor from PDF points to rendered pixels.
    pub fn render_scale(&self) -> f32 {
        self.dpi() as f32 / POINTS_PER_INCH
    }

    /// Check that a custom resolution is in range.
    pub fn validate(&self) -> Result<()> {
        let dpi = self.dpi();
        if !(Self::MIN_DPI..=Self::MAX_DPI).contains(&dpi) {
            return Err(Error::config(format!(
                "render resolution must be between {} and {} DPI, got {}",
                Self::MIN_DPI,
                Self::MAX_DPI,
                dpi
            )));
        }
        Ok(())
    }

    /// Parse a preset name or a bare DPI number.
    pub fn parse(s: &str) -> Result<Self> {
        let preset = match s.trim().to_lowercase().as_str() {
            "draft" | "fast" => QualityPreset::Draft,
            "standard" | "balanced" => QualityPreset::Standard,
            "high" | "best" => QualityPreset::High,
            other => {
                let dpi: u32 = other
                    .trim_end_matches("dpi")
                    .parse()
                    .map_err(|_| Error::config(format!("unknown quality preset: {}", s)))?;
                QualityPreset::Custom(dpi)
            }
        };
        preset.validate()?;
        Ok(preset)
    }
}

/// Page selection for reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Process all pages
    #[default]
    All,
    /// Process a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Process specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                return Ok(PageSelection::Range(parse_range(s, start, end)?));
            }
        }

        let mut pages = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let range = parse_range(part, start, end)?;
                if range.end() - range.start() >= MAX_PAGES_LIMIT {
                    return Err(Error::config(format!(
                        "page range {} spans more than {} pages",
                        part, MAX_PAGES_LIMIT
                    )));
                }
                pages.extend(range);
            } else {
                pages.insert(parse_page_number(part)?);
            }
            if pages.len() > MAX_PAGES_LIMIT as usize {
                return Err(Error::config(format!(
                    "page list selects more than {} pages",
                    MAX_PAGES_LIMIT
                )));
            }
        }

        Ok(PageSelection::Pages(pages.into_iter().collect()))
    }
}

fn parse_range(part: &str, start: &str, end: &str) -> Result<RangeInclusive<u32>> {
    let start = parse_page_number(start)?;
    let end = parse_page_number(end)?;
    if start > end {
        return Err(Error::config(format!("page range {} is reversed", part)));
    }
    Ok(start..=end)
}

fn parse_page_number(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::config(format!("invalid page number: {:?}", s.trim()))),
        Ok(p) => Ok(p),
    }
}
