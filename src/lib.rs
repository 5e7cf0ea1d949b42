//! ytrag - ask questions about a YouTube video
//!
//! A local-first CLI tool that turns a video's subtitles into a searchable
//! transcript and answers questions about it with models served by Ollama.
//!
//! # Overview
//!
//! ytrag allows you to:
//! - Download a video's subtitles with yt-dlp (never the video itself)
//! - Clean the VTT file into plain caption text
//! - Typeset the transcript as a PDF
//! - Index the PDF in a vector store and ask questions about it
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `subtitles` - Subtitle download and cleanup
//! - `pdf` - PDF rendering and text extraction
//! - `chunking` - Recursive character splitting
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector database abstraction
//! - `llm` - Chat model access
//! - `rag` - Multi-query retrieval and question answering
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use ytrag::config::Settings;
//! use ytrag::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator.prepare("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("Indexed {} chunks", result.chunks_indexed);
//!
//!     let answer = orchestrator.query_chain().invoke("What is the video about?").await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod ollama;
pub mod orchestrator;
pub mod pdf;
pub mod rag;
pub mod subtitles;
pub mod vector_store;

#[cfg(test)]
mod testing;

pub use error::{Result, YtragError};
