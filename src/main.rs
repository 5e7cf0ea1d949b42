//! ytrag CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytrag::cli::{commands, Cli, Commands};
use ytrag::config::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };
    if let Some(host) = &cli.ollama_host {
        settings.ollama.host = host.clone();
    }

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytrag={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command {
        None => {
            commands::run_pipeline(None, None, settings).await?;
        }

        Some(Commands::Run { url, model }) => {
            commands::run_pipeline(url, model, settings).await?;
        }

        Some(Commands::Clean { input, output }) => {
            commands::run_clean(&input, output, &settings)?;
        }

        Some(Commands::Render { input, output }) => {
            commands::run_render(&input, output, &settings)?;
        }

        Some(Commands::Chat { pdf, model }) => {
            commands::run_chat(pdf, model, settings).await?;
        }

        Some(Commands::Doctor) => {
            commands::run_doctor(&settings, cli.config.as_deref()).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
