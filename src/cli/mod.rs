//! CLI module for ytrag.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{format_size, Output};

use clap::{Parser, Subcommand};

/// ytrag - ask questions about a YouTube video
///
/// Downloads a video's subtitles, turns them into a clean transcript and a PDF,
/// indexes the PDF with a local Ollama embedding model and answers questions
/// about it. Run without a subcommand for the interactive pipeline.
#[derive(Parser, Debug)]
#[command(name = "ytrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Ollama server URL
    #[arg(long, env = "OLLAMA_HOST", global = true)]
    pub ollama_host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index for a video and start asking questions
    Run {
        /// YouTube URL or video ID (prompted for when omitted)
        url: Option<String>,

        /// Chat model used for query expansion and answers
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Turn a VTT subtitle file into plain transcript text
    Clean {
        /// Subtitle file to clean
        input: String,

        /// Output file (the configured transcript path if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Typeset a text file as a PDF
    Render {
        /// Text file to render
        input: String,

        /// Output file (the configured PDF path if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Index an existing PDF and start asking questions
    Chat {
        /// PDF to index (the configured PDF path if not specified)
        pdf: Option<String>,

        /// Chat model used for query expansion and answers
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
