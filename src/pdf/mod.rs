//! PDF rendering of cleaned transcripts and text extraction for indexing.

mod layout;
mod loader;
mod render;

pub use layout::{wrap_text, PageLayout};
pub use loader::{DocumentLoader, PdfLoader};
pub use render::PdfRenderer;
