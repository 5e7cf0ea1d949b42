//! CLI command implementations.

mod chat;
mod clean;
mod config;
mod doctor;
mod render;
mod run;

pub use chat::run_chat;
pub use clean::run_clean;
pub use config::run_config;
pub use doctor::run_doctor;
pub use render::run_render;
pub use run::run_pipeline;

use crate::cli::Output;
use crate::orchestrator::Orchestrator;
use crate::rag::run_query_loop;
use std::io;

/// Answer questions from stdin until the user types `exit`.
async fn query_loop(orchestrator: &Orchestrator) -> anyhow::Result<()> {
    let chain = orchestrator.query_chain();
    Output::info(&format!("Answering with {}", chain.model()));

    let stdin = io::stdin();
    let answered = run_query_loop(&chain, stdin.lock(), io::stdout()).await?;

    tracing::info!("Session ended after {} questions", answered);
    Ok(())
}

/// Print a pre-flight failure with a pointer to the doctor command.
fn preflight_failed(e: crate::error::YtragError) -> anyhow::Error {
    Output::error(&format!("{}", e));
    Output::info("Run 'ytrag doctor' for detailed diagnostics.");
    e.into()
}
