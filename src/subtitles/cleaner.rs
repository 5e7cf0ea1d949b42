//! Subtitle cleanup.
//!
//! Turns a raw WebVTT subtitle file, as written by yt-dlp for auto-generated
//! captions, into one line of plain text. YouTube's auto captions repeat every
//! caption twice (once with per-word timing tags, once plain) and carry cue
//! headers between them, so the cleaner is a permissive line filter followed by
//! adjacent-duplicate suppression.

use crate::error::Result;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Lines starting with one of these are file header metadata.
const HEADER_MARKERS: [&str; 3] = ["WEBVTT", "Kind:", "Language:"];

/// Classification of a single subtitle line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// File header metadata (`WEBVTT`, `Kind:`, `Language:`).
    Header,
    /// Cue timing line starting with `HH:MM:SS.mmm`.
    Timestamp,
    /// Caption carrying inline `<HH:MM:SS.mmm>` word timings.
    InlineTiming,
    /// Caption carrying `<c>` styling markup.
    Styled,
    /// Anything else; kept as caption text.
    Caption,
}

impl LineKind {
    /// Whether a line of this kind ends up in the cleaned transcript.
    pub fn is_caption(self) -> bool {
        self == LineKind::Caption
    }
}

/// The retained caption lines of a subtitle file, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTranscript {
    lines: Vec<String>,
}

impl CleanedTranscript {
    /// Retained lines, before joining.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Retained lines joined with single spaces.
    pub fn text(&self) -> String {
        self.lines.join(" ")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Line filter for WebVTT subtitle files.
pub struct SubtitleCleaner {
    timestamp_line: Regex,
    inline_timestamp: Regex,
    style_tag: Regex,
}

impl SubtitleCleaner {
    pub fn new() -> Self {
        Self {
            timestamp_line: Regex::new(r"^\d\d:\d\d:\d\d\.\d\d\d").expect("Invalid regex"),
            inline_timestamp: Regex::new(r"<\d\d:\d\d:\d\d\.\d\d\d>").expect("Invalid regex"),
            // <c>, </c> and class-qualified openers such as <c.colorE5E5E5>
            style_tag: Regex::new(r"</?c(?:\.[\w.-]+)?>").expect("Invalid regex"),
        }
    }

    /// Classify a line with its terminator already removed.
    pub fn classify(&self, line: &str) -> LineKind {
        if line.trim().is_empty() {
            LineKind::Blank
        } else if HEADER_MARKERS.iter().any(|marker| line.starts_with(marker)) {
            LineKind::Header
        } else if self.timestamp_line.is_match(line) {
            LineKind::Timestamp
        } else if self.inline_timestamp.is_match(line) {
            LineKind::InlineTiming
        } else if self.style_tag.is_match(line) {
            LineKind::Styled
        } else {
            LineKind::Caption
        }
    }

    /// Filter raw subtitle lines down to caption text.
    ///
    /// A caption equal to the last *retained* line is dropped, even when
    /// discarded lines sit between the two. Tagged lines are dropped whole.
    pub fn clean_lines<I, S>(&self, lines: I) -> CleanedTranscript
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines.into_iter().fold(Vec::<String>::new(), |mut kept, raw| {
            let line = strip_terminator(raw.as_ref());
            if !self.classify(line).is_caption() {
                return kept;
            }

            let line = line.trim();
            if kept.last().is_some_and(|previous| previous == line) {
                return kept;
            }

            kept.push(line.to_string());
            kept
        });

        CleanedTranscript { lines }
    }

    /// Clean a subtitle file and write the joined text to `output`.
    ///
    /// Any existing file at `output` is overwritten; an input without captions
    /// produces an empty file.
    #[instrument(skip(self))]
    pub fn clean_file(&self, input: &Path, output: &Path) -> Result<CleanedTranscript> {
        let raw = std::fs::read_to_string(input)?;
        let transcript = self.clean_lines(raw.split_inclusive('\n'));

        debug!("Retained {} caption lines", transcript.len());

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, transcript.text())?;

        info!("Transcript cleaned and saved to {:?}", output);
        Ok(transcript)
    }
}

impl Default for SubtitleCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove a trailing `\n` or `\r\n`.
fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YOUTUBE_AUTO_SUBS: &str = "WEBVTT\n\
Kind: captions\n\
Language: en\n\
\n\
00:00:00.000 --> 00:00:02.310 align:start position:0%\n\
 \n\
hey<00:00:00.320><c> everyone</c><00:00:00.640><c> welcome</c>\n\
\n\
00:00:02.310 --> 00:00:02.320 align:start position:0%\n\
hey everyone welcome\n\
 \n\
\n\
00:00:02.320 --> 00:00:05.110 align:start position:0%\n\
hey everyone welcome\n\
to<00:00:02.560><c> the</c><00:00:02.800><c> channel</c>\n\
\n\
00:00:05.110 --> 00:00:05.120 align:start position:0%\n\
to the channel\n\
 \n";

    #[test]
    fn test_classify() {
        let cleaner = SubtitleCleaner::new();

        assert_eq!(cleaner.classify(""), LineKind::Blank);
        assert_eq!(cleaner.classify("   "), LineKind::Blank);
        assert_eq!(cleaner.classify("WEBVTT"), LineKind::Header);
        assert_eq!(cleaner.classify("Kind: captions"), LineKind::Header);
        assert_eq!(cleaner.classify("Language: en"), LineKind::Header);
        assert_eq!(
            cleaner.classify("00:00:01.000 --> 00:00:02.000 align:start position:0%"),
            LineKind::Timestamp
        );
        assert_eq!(
            cleaner.classify("so<00:00:03.120> what"),
            LineKind::InlineTiming
        );
        assert_eq!(cleaner.classify("Hello <c>world</c>"), LineKind::Styled);
        assert_eq!(cleaner.classify("trailing</c>"), LineKind::Styled);
        assert_eq!(cleaner.classify("<c.colorE5E5E5>red</c>"), LineKind::Styled);
        assert_eq!(cleaner.classify("Goodbye"), LineKind::Caption);
        assert_eq!(cleaner.classify("1:2 is a ratio"), LineKind::Caption);
    }

    #[test]
    fn test_headers_blanks_timestamps_and_tags_are_dropped() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines([
            "WEBVTT\n",
            "\n",
            "00:00:01.000 --> 00:00:02.000\n",
            "Hello <c>world</c>\n",
            "Hello <c>world</c>\n",
            "Goodbye\n",
        ]);

        assert_eq!(result.lines(), ["Goodbye"]);
        assert_eq!(result.text(), "Goodbye");
    }

    #[test]
    fn test_adjacent_duplicate_suppressed_once() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(["Same line\n", "Same line\n", "Different\n"]);

        assert_eq!(result.text(), "Same line Different");
    }

    #[test]
    fn test_duplicate_across_discarded_lines() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines([
            "Hi\n",
            "00:00:01.000 --> 00:00:02.000\n",
            "\n",
            "Hi\n",
            "there\n",
        ]);

        assert_eq!(result.text(), "Hi there");
    }

    #[test]
    fn test_non_adjacent_repeats_are_kept() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(["a\n", "b\n", "a\n"]);

        assert_eq!(result.text(), "a b a");
    }

    #[test]
    fn test_lines_are_trimmed_before_comparison() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(["  spaced  \n", "spaced\r\n", "next\r\n"]);

        assert_eq!(result.lines(), ["spaced", "next"]);
    }

    #[test]
    fn test_last_line_without_terminator_is_intact() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(["first\n", "last"]);

        assert_eq!(result.text(), "first last");
    }

    #[test]
    fn test_youtube_auto_captions() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(YOUTUBE_AUTO_SUBS.split_inclusive('\n'));

        assert_eq!(result.text(), "hey everyone welcome to the channel");
    }

    #[test]
    fn test_cleaned_output_is_stable() {
        let cleaner = SubtitleCleaner::new();
        let once = cleaner.clean_lines(YOUTUBE_AUTO_SUBS.split_inclusive('\n')).text();
        let twice = cleaner.clean_lines([once.as_str()]).text();

        assert_eq!(once, twice);

        let single = cleaner.clean_lines(["Same line Different"]).text();
        assert_eq!(single, "Same line Different");
    }

    #[test]
    fn test_empty_input() {
        let cleaner = SubtitleCleaner::new();
        let result = cleaner.clean_lines(Vec::<String>::new());

        assert!(result.is_empty());
        assert_eq!(result.text(), "");
    }

    #[test]
    fn test_invariants_hold_for_generated_inputs() {
        let cleaner = SubtitleCleaner::new();
        let pool = [
            "WEBVTT\n",
            "Kind: captions\n",
            "\n",
            " \n",
            "00:00:01.000 --> 00:00:02.000\n",
            "x<00:00:01.500><c> y</c>\n",
            "caption\n",
            " caption \n",
            "other\n",
        ];
        let timestamp = Regex::new(r"^\d\d:\d\d:\d\d\.\d\d\d").unwrap();

        // Every sequence of length 4 over the pool.
        let n = pool.len();
        for code in 0..n.pow(4) {
            let mut input = Vec::with_capacity(4);
            let mut rest = code;
            for _ in 0..4 {
                input.push(pool[rest % n]);
                rest /= n;
            }

            let result = cleaner.clean_lines(&input);
            for line in result.lines() {
                assert!(!HEADER_MARKERS.iter().any(|m| line.starts_with(m)), "{input:?}");
                assert!(!timestamp.is_match(line), "{input:?}");
                assert!(!line.contains("<c>") && !line.contains("</c>"), "{input:?}");
                assert!(!line.trim().is_empty(), "{input:?}");
            }
            for pair in result.lines().windows(2) {
                assert_ne!(pair[0], pair[1], "{input:?}");
            }
        }
    }

    #[test]
    fn test_clean_file_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("subtitle_file.en.vtt");
        let output = dir.path().join("transcript_cleaned.txt");
        std::fs::write(&input, YOUTUBE_AUTO_SUBS).unwrap();
        std::fs::write(&output, "stale content from an earlier run").unwrap();

        let cleaner = SubtitleCleaner::new();
        let transcript = cleaner.clean_file(&input, &output).unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "hey everyone welcome to the channel"
        );
    }

    #[test]
    fn test_clean_file_empty_input_writes_zero_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.vtt");
        let output = dir.path().join("transcript_cleaned.txt");
        std::fs::write(&input, "").unwrap();

        let transcript = SubtitleCleaner::new().clean_file(&input, &output).unwrap();

        assert!(transcript.is_empty());
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 0);
    }
}
