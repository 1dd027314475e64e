//! Rendering options.

/// Options for rendering a reconstructed document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Character to use for bullet list markers
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Emit a horizontal rule at page breaks
    pub page_break_rule: bool,

    /// Emit a note for pages that need OCR
    pub scan_warnings: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the bullet list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable horizontal rules at page breaks.
    pub fn with_page_break_rule(mut self, rule: bool) -> Self {
        self.page_break_rule = rule;
        self
    }

    /// Enable or disable scan-warning notes.
    pub fn with_scan_warnings(mut self, include: bool) -> Self {
        self.scan_warnings = include;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            list_marker: '-',
            escape_special_chars: true,
            page_break_rule: true,
            scan_warnings: true,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_max_heading(9)
            .with_list_marker('*')
            .with_page_break_rule(false)
            .with_scan_warnings(false);

        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.list_marker, '*');
        assert!(!options.page_break_rule);
        assert!(!options.scan_warnings);
    }
}
