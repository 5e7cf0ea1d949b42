//! Context formatting for the answer prompt.

use crate::vector_store::Document;

/// Join retrieved chunk contents, separated by blank lines.
pub fn format_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        Document::new(
            "simple-rag".into(),
            "transcript.pdf".into(),
            content.into(),
            0,
            vec![],
        )
    }

    #[test]
    fn test_format_context() {
        let docs = vec![doc("first chunk\n"), doc("second chunk")];
        assert_eq!(format_context(&docs), "first chunk\n\nsecond chunk");
        assert_eq!(format_context(&[]), "");
    }
}
