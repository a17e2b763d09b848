use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::{borrow::Cow, fs, path::Path};
use thiserror::Error;

lazy_static! {
    // Greedy prefix, so words may contain commas; the count is the trailing digit group.
    static ref RECORD_REGEX: Regex = Regex::new(r"^(.*),([0-9]+)$").unwrap();
}

/// A single `word,count` line from a word-count file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCountRecord {
    pub word: String,
    pub count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The line does not end in `,<digits>`
    #[error("line does not end in `,<count>`")]
    NoMatch,
}

/// A line that was skipped, with enough context to report it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind}, skipping {line:?}")]
pub struct ParseError {
    pub line_number: usize,
    pub line: String,
    pub kind: ParseErrorKind,
}

/// Parse one line (without its line terminator). Trailing whitespace is ignored.
pub fn parse_line(line_number: usize, line: &str) -> Result<WordCountRecord, ParseError> {
    let trimmed = line.trim_end();
    let error = |kind| ParseError {
        line_number,
        line: trimmed.to_owned(),
        kind,
    };
    let captures = RECORD_REGEX.captures(trimmed).ok_or_else(|| error(ParseErrorKind::NoMatch))?;
    // `[0-9]+` only fails to parse on overflow, and the line is still a record
    let count = captures[2].parse::<u64>().unwrap_or_else(|_| {
        warn!("line {}: count {} saturated to {}", line_number, &captures[2], u64::MAX);
        u64::MAX
    });
    Ok(WordCountRecord {
        word: captures[1].to_owned(),
        count,
    })
}

/// Records that parsed, alongside the lines that didn't.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<WordCountRecord>,
    pub errors: Vec<ParseError>,
}

impl ParsedFile {
    /// Parse every line of `contents`. Bad lines are logged and collected, never fatal.
    pub fn parse(contents: &str) -> Self {
        let mut parsed = Self::default();
        for (index, line) in contents.lines().enumerate() {
            match parse_line(index + 1, line) {
                Ok(record) => parsed.records.push(record),
                Err(error) => {
                    warn!("{}", error);
                    parsed.errors.push(error);
                }
            }
        }
        debug!("parsed {} records, skipped {} lines", parsed.records.len(), parsed.errors.len());
        parsed
    }

    /// Read the whole file, then parse it. The file handle is closed before parsing starts.
    ///
    /// Bytes that aren't valid UTF-8 are replaced with U+FFFD, so a stray Latin-1 word
    /// only affects its own line.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("failed to read word-count file {}", path.display()))?;
        let contents = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = contents {
            warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
        }
        Ok(Self::parse(&contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_line() {
        let record = parse_line(1, "apple,100").unwrap();
        assert_eq!(
            record,
            WordCountRecord {
                word: String::from("apple"),
                count: 100
            }
        );
    }

    #[test]
    fn test_word_keeps_inner_commas() {
        let record = parse_line(1, "one,two,three,7").unwrap();
        assert_eq!(record.word, "one,two,three");
        assert_eq!(record.count, 7);
    }

    #[test]
    fn test_trailing_whitespace_is_stripped() {
        let record = parse_line(3, "banana,50 \t\r").unwrap();
        assert_eq!(record.word, "banana");
        assert_eq!(record.count, 50);
    }

    #[test]
    fn test_empty_word_is_allowed() {
        let record = parse_line(1, ",12").unwrap();
        assert_eq!(record.word, "");
        assert_eq!(record.count, 12);
    }

    #[test]
    fn test_bad_lines() {
        let error = parse_line(4, "noNumberHere").unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::NoMatch);
        assert_eq!(error.line_number, 4);
        assert_eq!(parse_line(1, "word,-3").unwrap_err().kind, ParseErrorKind::NoMatch);
        assert_eq!(parse_line(1, "word,12a").unwrap_err().kind, ParseErrorKind::NoMatch);
        assert_eq!(parse_line(1, "").unwrap_err().kind, ParseErrorKind::NoMatch);
    }

    #[test]
    fn test_huge_count_saturates() {
        let record = parse_line(1, "huge,99999999999999999999999").unwrap();
        assert_eq!(record.word, "huge");
        assert_eq!(record.count, u64::MAX);
    }

    #[test]
    fn test_huge_count_keeps_later_ranks() {
        let mut contents = String::from("the,99999999999999999999999\n");
        for i in 1..101 {
            contents.push_str(&format!("w{},{}\n", i, 1000 - i));
        }
        let parsed = ParsedFile::parse(&contents);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.records.len(), 101);
        assert_eq!(parsed.records[100].word, "w100");
    }

    #[test]
    fn test_read_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"the,500\ncaf\xe9,300\nof,200\nand,100\n").unwrap();
        let parsed = ParsedFile::read(&path).unwrap();
        assert!(parsed.errors.is_empty());
        let counts: Vec<_> = parsed.records.iter().map(|r| r.count).collect();
        assert_eq!(counts, [500, 300, 200, 100]);
        assert_eq!(parsed.records[1].word, "caf\u{FFFD}");
    }

    #[test]
    fn test_parse_collects_failures() {
        let parsed = ParsedFile::parse("the,500\nnoNumberHere\nof,300\n\nand,200\n");
        let words: Vec<_> = parsed.records.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, ["the", "of", "and"]);
        let bad_lines: Vec<_> = parsed.errors.iter().map(|e| e.line_number).collect();
        assert_eq!(bad_lines, [2, 4]);
    }

    #[test]
    fn test_error_message_names_the_line() {
        let error = parse_line(9, "noNumberHere").unwrap_err();
        assert_eq!(error.to_string(), r#"line 9: line does not end in `,<count>`, skipping "noNumberHere""#);
    }
}
