//! Page-fitting line layout.

use crate::config::PdfSettings;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Average advance of a proportional sans font, in ems. Slightly generous so
/// wrapped lines never run into the right margin.
const AVG_CHAR_WIDTH_EM: f32 = 0.55;

/// Geometry of a rendered page, in millimetres unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Left, right and top margin.
    pub margin_mm: f32,
    /// Space kept free at the bottom before breaking to a new page.
    pub bottom_margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
}

impl Default for PageLayout {
    /// A4 with 10 mm margins, a 20 mm page-break margin and 12 pt text on 10 mm lines.
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
        }
    }
}

impl PageLayout {
    pub fn from_settings(settings: &PdfSettings) -> Self {
        Self {
            margin_mm: settings.margin_mm,
            font_size_pt: settings.font_size,
            line_height_mm: settings.line_height_mm,
            ..Self::default()
        }
    }

    /// Characters that fit between the side margins.
    pub fn max_chars_per_line(&self) -> usize {
        let usable = self.page_width_mm - 2.0 * self.margin_mm;
        let char_width = self.font_size_pt * PT_TO_MM * AVG_CHAR_WIDTH_EM;
        ((usable / char_width).floor() as usize).max(1)
    }

    /// Lines that fit between the top margin and the page-break margin.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.margin_mm - self.bottom_margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Baseline of the given row, measured from the bottom edge.
    ///
    /// Text sits vertically centred in its line cell.
    pub fn baseline_mm(&self, row: usize) -> f32 {
        let cell_top = self.page_height_mm - self.margin_mm - self.line_height_mm * row as f32;
        let font_mm = self.font_size_pt * PT_TO_MM;
        cell_top - (self.line_height_mm + font_mm * 0.7) / 2.0
    }

    /// Split wrapped lines into pages. Always yields at least one page.
    pub fn paginate<'a>(&self, lines: &'a [String]) -> Vec<&'a [String]> {
        if lines.is_empty() {
            return vec![lines];
        }
        lines.chunks(self.lines_per_page()).collect()
    }
}

/// Greedy word wrap.
///
/// Each `\n`-separated paragraph is wrapped independently; an empty paragraph
/// becomes one blank line. Words longer than a line are split on char boundaries.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let start = lines.len();
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }

            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_chars {
                lines.push(chars.drain(..max_chars).collect());
            }
            current = chars.into_iter().collect();
            current_len = current.chars().count();
        }

        if !current.is_empty() || lines.len() == start {
            lines.push(current);
        }
    }

    lines
}
