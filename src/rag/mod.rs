//! RAG (Retrieval-Augmented Generation) over the indexed transcript.
//!
//! Questions are expanded into several phrasings, each phrasing retrieves its
//! nearest chunks, and the union becomes the context of a single answer prompt.

mod chain;
mod context;
mod multi_query;
mod session;

pub use chain::RagChain;
pub use context::format_context;
pub use multi_query::{parse_queries, MultiQueryRetriever};
pub use session::{run_query_loop, EXIT_COMMAND, QUERY_PROMPT};
