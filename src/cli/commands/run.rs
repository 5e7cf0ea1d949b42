//! Run command - the full interactive pipeline.

use super::{preflight_failed, query_loop};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use std::io::{self, BufRead, Write};

/// Prompt shown when no URL was given on the command line.
const URL_PROMPT: &str = "Enter YouTube video URL: ";

/// Build the index for one video, then start the question loop.
pub async fn run_pipeline(
    url: Option<String>,
    model: Option<String>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    let url = match url {
        Some(url) => url,
        None => {
            let stdin = io::stdin();
            read_url(stdin.lock(), io::stdout())?
        }
    };

    if let Some(model) = model {
        settings.rag.model = model;
    }

    preflight::check(Operation::Pipeline, &settings)
        .await
        .map_err(preflight_failed)?;

    let orchestrator = Orchestrator::new(settings)?;
    let result = orchestrator.prepare(&url).await?;

    Output::success(&format!(
        "Indexed {} chunks from {}",
        result.chunks_indexed,
        result.pdf_path.display()
    ));

    query_loop(&orchestrator).await
}

/// Prompt for a video URL and read one line.
fn read_url<R: BufRead, W: Write>(mut input: R, mut output: W) -> anyhow::Result<String> {
    write!(output, "{}", URL_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("No video URL given");
    }

    let url = line.trim();
    if url.is_empty() {
        anyhow::bail!("No video URL given");
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_url() {
        let mut out = Vec::new();
        let url = read_url(Cursor::new("  https://youtu.be/dQw4w9WgXcQ \n"), &mut out).unwrap();

        assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(String::from_utf8(out).unwrap(), URL_PROMPT);
    }

    #[test]
    fn test_read_url_rejects_empty_input() {
        assert!(read_url(Cursor::new(""), io::sink()).is_err());
        assert!(read_url(Cursor::new("   \n"), io::sink()).is_err());
    }
}
