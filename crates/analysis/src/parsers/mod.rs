use crate::error::{AnalysisError, AnalysisResult};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

mod whatsapp;

pub use whatsapp::WhatsAppParser;

/// One chat message extracted from a transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Time the message was sent, or the processing time when unreadable.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// Normalised sender name.
    pub sender: String,
    /// Message body, trimmed.
    pub message: String,
    /// Transcript line the record came from.
    pub original_line: String,
}

/// Trait for transcript line parsers.
pub trait ChatParser: Send + Sync {
    /// Returns the name of the parser.
    fn name(&self) -> &str;

    /// Whether a single trimmed line follows this parser's grammar.
    fn matches_line(&self, line: &str) -> bool;

    /// Parse every matching line, using `fallback` for unreadable timestamps.
    fn parse_at(&self, text: &str, fallback: NaiveDateTime) -> Vec<MessageRecord>;

    /// Parse every matching line; unreadable timestamps become the current time.
    fn parse(&self, text: &str) -> Vec<MessageRecord> {
        self.parse_at(text, Local::now().naive_local())
    }

    /// Check if any line of `text` follows this parser's grammar.
    fn can_parse(&self, text: &str) -> bool {
        text.lines().any(|line| self.matches_line(clean_line(line)))
    }

    /// Read and parse a transcript file.
    fn parse_file(&self, path: &Path) -> AnalysisResult<Vec<MessageRecord>> {
        let content = std::fs::read_to_string(path)?;
        let records = self.parse(&content);
        info!(
            "{}: parsed {} messages from {}",
            self.name(),
            records.len(),
            path.display()
        );
        Ok(records)
    }
}

/// Outcome of a transcript format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormatCheck {
    /// Enough lines look like chat messages.
    Valid {
        /// Matching lines.
        messages: usize,
    },
    /// The input is blank.
    Empty,
    /// No line looks like a chat message.
    NoMessages,
    /// Fewer than 30% of lines look like chat messages.
    TooFewMessages {
        /// Matching lines.
        messages: usize,
        /// All lines of the input.
        lines: usize,
    },
}

impl FormatCheck {
    /// Whether the transcript was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, FormatCheck::Valid { .. })
    }

    /// Number of message lines, or [`AnalysisError::InvalidInput`] when rejected.
    pub fn ensure_valid(self) -> AnalysisResult<usize> {
        match self {
            FormatCheck::Valid { messages } => Ok(messages),
            rejected => Err(AnalysisError::InvalidInput(rejected.to_string())),
        }
    }
}

impl std::fmt::Display for FormatCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatCheck::Valid { messages } => write!(f, "Found {} chat messages", messages),
            FormatCheck::Empty => write!(f, "No text provided"),
            FormatCheck::NoMessages => write!(
                f,
                "No chat message format detected. Messages must look like: [date, time] Name: message"
            ),
            FormatCheck::TooFewMessages { messages, lines } => write!(
                f,
                "Only {} out of {} lines appear to be chat messages",
                messages, lines
            ),
        }
    }
}

/// Decide whether `text` looks like a transcript `parser` understands.
pub fn validate_format(parser: &dyn ChatParser, text: &str) -> FormatCheck {
    let text = text.trim();
    if text.is_empty() {
        return FormatCheck::Empty;
    }

    let lines: Vec<&str> = text.lines().collect();
    let messages = lines
        .iter()
        .filter(|line| parser.matches_line(clean_line(line)))
        .count();

    if messages == 0 {
        FormatCheck::NoMessages
    } else if messages * 10 < lines.len() * 3 {
        FormatCheck::TooFewMessages {
            messages,
            lines: lines.len(),
        }
    } else {
        FormatCheck::Valid { messages }
    }
}

/// Serde adapter writing timestamps in the roster's `DATE_FORMAT`.
pub(crate) mod timestamp_format {
    use chrono::NaiveDateTime;
    use matchday_core::constants::DATE_FORMAT;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Trim a raw line and drop direction/byte-order marks exporters prepend.
pub(crate) fn clean_line(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['\u{200e}', '\u{200f}', '\u{feff}'])
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> WhatsAppParser {
        WhatsAppParser::new().expect("parser")
    }

    #[test]
    fn validate_rejects_blank_input() {
        assert_eq!(validate_format(&parser(), "  \n "), FormatCheck::Empty);
    }

    #[test]
    fn validate_rejects_text_without_messages() {
        let check = validate_format(&parser(), "hello\nworld");
        assert_eq!(check, FormatCheck::NoMessages);
        assert!(!check.is_valid());
    }

    #[test]
    fn validate_requires_thirty_percent_message_lines() {
        let text = "[13/10/25, 15:45:23] Ali: geliyorum\nnoise\nnoise\nnoise";
        assert_eq!(
            validate_format(&parser(), text),
            FormatCheck::TooFewMessages {
                messages: 1,
                lines: 4
            }
        );

        let text = "[13/10/25, 15:45:23] Ali: geliyorum\nnoise\nnoise";
        assert_eq!(
            validate_format(&parser(), text),
            FormatCheck::Valid { messages: 1 }
        );
    }

    #[test]
    fn rejected_check_becomes_invalid_input() {
        let err = validate_format(&parser(), "hello\nworld")
            .ensure_valid()
            .expect_err("not a transcript");
        assert!(matches!(err, AnalysisError::InvalidInput(ref msg) if msg.starts_with("No chat message format")));

        let ok = validate_format(&parser(), "[13/10/25, 15:45:23] Ali: geliyorum");
        assert_eq!(ok.ensure_valid().expect("valid"), 1);
    }

    #[test]
    fn can_parse_skips_marks() {
        assert!(parser().can_parse("\u{200e}[13/10/25, 15:45:23] Ali: selam"));
        assert!(!parser().can_parse("Messages are end-to-end encrypted."));
    }
}
