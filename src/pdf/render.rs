//! Transcript to PDF rendering.

use super::layout::{wrap_text, PageLayout};
use crate::config::Settings;
use crate::error::{Result, YtragError};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const LAYER_NAME: &str = "Layer 1";

/// Renders plain text onto A4 pages.
pub struct PdfRenderer {
    layout: PageLayout,
    font_path: Option<PathBuf>,
    title: String,
}

impl PdfRenderer {
    /// Create a renderer using built-in Helvetica.
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            font_path: None,
            title: "Transcript".to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            layout: PageLayout::from_settings(&settings.pdf),
            font_path: settings.pdf_font_path(),
            title: settings.pdf.title.clone(),
        }
    }

    /// Embed a TrueType font instead of Helvetica. Needed for text outside Latin-1.
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Distinct characters of `text` the selected font cannot show, in order
    /// of first appearance. Always empty with an embedded TrueType font.
    pub fn unsupported_chars(&self, text: &str) -> Vec<char> {
        if self.font_path.is_some() {
            return Vec::new();
        }

        let mut missing: Vec<char> = Vec::new();
        for c in text.chars() {
            if !c.is_control() && !is_win_ansi(c) && !missing.contains(&c) {
                missing.push(c);
            }
        }
        missing
    }

    /// Render text into PDF bytes.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        let lines = wrap_text(text, self.layout.max_chars_per_line());
        let pages = self.layout.paginate(&lines);

        let width = Mm(self.layout.page_width_mm);
        let height = Mm(self.layout.page_height_mm);
        let (doc, first_page, first_layer) = PdfDocument::new(self.title.as_str(), width, height, LAYER_NAME);
        let font = self.load_font(&doc)?;

        let missing = self.unsupported_chars(text);
        if !missing.is_empty() {
            warn!(
                "Helvetica cannot encode {} character(s), they will be missing from the PDF: {}. \
                 Set [pdf] font_path to a Unicode TrueType font such as DejaVuSans.ttf",
                missing.len(),
                missing.iter().collect::<String>()
            );
        }

        for (index, page_lines) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER_NAME)
            };
            let layer = doc.get_page(page).get_layer(layer);

            for (row, line) in page_lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                layer.use_text(
                    line.as_str(),
                    self.layout.font_size_pt,
                    Mm(self.layout.margin_mm),
                    Mm(self.layout.baseline_mm(row)),
                    &font,
                );
            }
        }

        debug!("Laid out {} lines on {} pages", lines.len(), pages.len());

        doc.save_to_bytes()
            .map_err(|e| YtragError::PdfRender(format!("Failed to serialize PDF: {}", e)))
    }

    /// Read a text file and write it out as a PDF. Returns the number of pages.
    #[instrument(skip(self))]
    pub fn render_file(&self, text_path: &Path, pdf_path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(text_path)?;
        let bytes = self.render(&text)?;

        if let Some(parent) = pdf_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(pdf_path, bytes)?;

        let pages = self
            .layout
            .paginate(&wrap_text(&text, self.layout.max_chars_per_line()))
            .len();
        info!("Rendered {:?} ({} pages)", pdf_path, pages);
        Ok(pages)
    }

    fn load_font(&self, doc: &PdfDocumentReference) -> Result<IndirectFontRef> {
        match &self.font_path {
            Some(path) => {
                let file = File::open(path).map_err(|e| {
                    YtragError::PdfRender(format!("Cannot open font file {:?}: {}", path, e))
                })?;
                doc.add_external_font(file).map_err(|e| {
                    YtragError::PdfRender(format!("Cannot load font {:?}: {}", path, e))
                })
            }
            None => doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| YtragError::PdfRender(format!("Cannot load Helvetica: {}", e))),
        }
    }
}

/// Whether the built-in fonts' WinAnsi encoding has a code for `c`.
fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž' | '‘'
                | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž' | 'Ÿ'
        )
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}
