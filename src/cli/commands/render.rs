//! Render command - text file to PDF.

use crate::cli::{format_size, Output};
use crate::config::Settings;
use crate::pdf::PdfRenderer;

/// Render `input` into `output`, or into the configured PDF path.
pub fn run_render(input: &str, output: Option<String>, settings: &Settings) -> anyhow::Result<()> {
    let input = Settings::expand_path(input);
    let output = output
        .map(|p| Settings::expand_path(&p))
        .unwrap_or_else(|| settings.pdf_path());

    let pages = PdfRenderer::from_settings(settings).render_file(&input, &output)?;
    let size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    Output::success(&format!("{} created successfully", output.display()));
    Output::kv("Pages", &pages.to_string());
    Output::kv("Size", &format_size(size));
    Ok(())
}
