//! Interactive question loop.

use super::RagChain;
use crate::error::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// Prompt shown before each question.
pub const QUERY_PROMPT: &str = "Enter your message (type 'exit' to quit): ";

/// Word that ends the loop.
pub const EXIT_COMMAND: &str = "exit";

/// Read questions from `input` and write answers to `output` until the user
/// types `exit` or the input ends. Returns how many questions were answered.
pub async fn run_query_loop<R: BufRead, W: Write>(
    chain: &RagChain,
    mut input: R,
    mut output: W,
) -> Result<usize> {
    let mut answered = 0;
    let mut line = String::new();

    loop {
        write!(output, "{}", QUERY_PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            writeln!(output)?;
            break;
        }

        let message = line.trim_end_matches(['\n', '\r']);
        if message == EXIT_COMMAND {
            break;
        }

        let answer = chain.invoke(message).await?;
        writeln!(output, "{}", answer)?;
        answered += 1;
    }

    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::MultiQueryRetriever;
    use crate::testing::{call_log, KeywordEmbedder, ScriptedChat};
    use crate::vector_store::MemoryVectorStore;
    use std::io::Cursor;
    use std::sync::Arc;

    fn chain(replies: &[&str]) -> (RagChain, Arc<ScriptedChat>) {
        let log = call_log();
        let chat = Arc::new(ScriptedChat::new(replies, log.clone()));
        let retriever = MultiQueryRetriever::new(
            Arc::new(MemoryVectorStore::new("simple-rag")),
            Arc::new(KeywordEmbedder::new(&[], log)),
            chat.clone(),
        );
        (RagChain::new(retriever, chat.clone()), chat)
    }

    #[test]
    fn test_exit_immediately() {
        let (chain, chat) = chain(&[]);
        let mut out = Vec::new();

        let answered =
            tokio_test::block_on(run_query_loop(&chain, Cursor::new("exit\n"), &mut out)).unwrap();

        assert_eq!(answered, 0);
        assert!(chat.prompts().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), QUERY_PROMPT);
    }

    #[test]
    fn test_answers_until_exit() {
        let (chain, _chat) = chain(&["q1", "First answer.", "q2", "Second answer."]);
        let mut out = Vec::new();
        let input = Cursor::new("What is it?\r\nAnd then?\nexit\nnever read\n");

        let answered = tokio_test::block_on(run_query_loop(&chain, input, &mut out)).unwrap();

        assert_eq!(answered, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{p}First answer.\n{p}Second answer.\n{p}",
                p = QUERY_PROMPT
            )
        );
    }

    #[test]
    fn test_exit_must_match_exactly() {
        let (chain, chat) = chain(&["alt", "Not quitting."]);
        let mut out = Vec::new();
        let input = Cursor::new("Exit\nexit\n");

        let answered = tokio_test::block_on(run_query_loop(&chain, input, &mut out)).unwrap();

        assert_eq!(answered, 1);
        assert!(chat.prompts()[1].contains("Question: Exit\n"));
    }

    #[test]
    fn test_end_of_input() {
        let (chain, chat) = chain(&[]);
        let mut out = Vec::new();

        let answered =
            tokio_test::block_on(run_query_loop(&chain, Cursor::new(""), &mut out)).unwrap();

        assert_eq!(answered, 0);
        assert!(chat.prompts().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", QUERY_PROMPT));
    }

    #[test]
    fn test_blank_line_is_a_question() {
        let (chain, chat) = chain(&["alt", "Ask me something."]);
        let mut out = Vec::new();

        let answered =
            tokio_test::block_on(run_query_loop(&chain, Cursor::new("\nexit\n"), &mut out)).unwrap();

        assert_eq!(answered, 1);
        assert!(chat.prompts()[1].contains("Question: \n"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{p}Ask me something.\n{p}", p = QUERY_PROMPT)
        );
    }

    #[test]
    fn test_chat_failure_stops_loop() {
        let (chain, _chat) = chain(&[]);
        let mut out = Vec::new();

        let result = tokio_test::block_on(run_query_loop(&chain, Cursor::new("hi\n"), &mut out));
        assert!(result.is_err());
    }
}
