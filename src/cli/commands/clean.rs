//! Clean command - subtitle file to plain transcript.

use crate::cli::Output;
use crate::config::Settings;
use crate::subtitles::SubtitleCleaner;

/// Clean `input` into `output`, or into the configured transcript path.
pub fn run_clean(input: &str, output: Option<String>, settings: &Settings) -> anyhow::Result<()> {
    let input = Settings::expand_path(input);
    let output = output
        .map(|p| Settings::expand_path(&p))
        .unwrap_or_else(|| settings.cleaned_transcript_path());

    let transcript = SubtitleCleaner::new().clean_file(&input, &output)?;

    if transcript.is_empty() {
        Output::warning(&format!("No caption lines found in {}", input.display()));
    }
    Output::success(&format!(
        "Transcript cleaned and saved to {} ({} lines)",
        output.display(),
        transcript.len()
    ));
    Ok(())
}
