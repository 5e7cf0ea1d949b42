//! Chat command - index an existing PDF and ask questions about it.

use super::{preflight_failed, query_loop};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;

/// Run the interactive chat command.
pub async fn run_chat(
    pdf: Option<String>,
    model: Option<String>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    let pdf_path = pdf
        .map(|p| Settings::expand_path(&p))
        .unwrap_or_else(|| settings.pdf_path());

    if !pdf_path.exists() {
        anyhow::bail!(
            "{} not found. Create it with 'ytrag run' or 'ytrag render'.",
            pdf_path.display()
        );
    }

    if let Some(model) = model {
        settings.rag.model = model;
    }

    preflight::check(Operation::Query, &settings)
        .await
        .map_err(preflight_failed)?;

    let orchestrator = Orchestrator::new(settings)?;
    let indexed = orchestrator.index_document(&pdf_path).await?;
    Output::success(&format!("Indexed {} chunks from {}", indexed, pdf_path.display()));

    query_loop(&orchestrator).await
}
